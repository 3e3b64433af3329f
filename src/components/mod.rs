//! Reusable flip-clock pieces.
//!
//! Every piece is a plain struct implementing [`Renderable`]; faces compose
//! them into the per-cycle vnode tree. A [`Card`] shows one digit and turns
//! over when the digit changed since the previous cycle; [`Divider`] and
//! [`Label`] are static decoration; [`Group`] arranges a run of pieces with
//! an optional caption.

mod card;
mod divider;
mod group;
mod label;

pub use card::{Card, CardItem};
pub use divider::Divider;
pub use group::Group;
pub use label::Label;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{NodeKind, Renderable};
    use crate::types::ANIMATE_CLASS;

    #[test]
    fn changed_card_carries_the_animate_class() {
        let card = Card::new("5", Some("4".to_string()));
        let node = card.render();
        let class = node.attributes.get("class").unwrap();
        assert!(class.contains("flip-clock-card"));
        assert!(class.contains(ANIMATE_CLASS));
    }

    #[test]
    fn unchanged_card_does_not_animate() {
        let card = Card::new("5", Some("5".to_string()));
        let node = card.render();
        let class = node.attributes.get("class").unwrap();
        assert!(!class.contains(ANIMATE_CLASS));
    }

    #[test]
    fn card_without_history_does_not_animate() {
        let card = Card::new("5", None);
        let node = card.render();
        assert!(!node.attributes.get("class").unwrap().contains(ANIMATE_CLASS));
    }

    #[test]
    fn card_shows_both_faces() {
        let card = Card::new("5", Some("4".to_string()));
        let node = card.render();
        assert_eq!(node.children.len(), 2);

        // Active face shows the current digit, the face behind it the last.
        let active = &node.children[0];
        assert!(active.attributes.get("class").unwrap().contains("active"));
        let inner = &active.children[0];
        let top = &inner.children[0];
        assert_eq!(top.children[0].text_content(), "5");

        let before = &node.children[1];
        assert!(before.attributes.get("class").unwrap().contains("before"));
        let inner = &before.children[0];
        let top = &inner.children[0];
        assert_eq!(top.children[0].text_content(), "4");
    }

    #[test]
    fn card_animation_rate_lands_in_style() {
        let card = Card::new("1", Some("0".to_string())).with_animation_rate(300);
        let node = card.render();
        let style = node.attributes.get("style").unwrap();
        assert!(style.contains("animation-delay: 300ms"));
        assert!(style.contains("animation-duration: 300ms"));
    }

    #[test]
    fn divider_wraps_its_character() {
        let node = Divider::new(':').render();
        assert_eq!(node.attributes.get("class").unwrap(), "flip-clock-divider");
        let inner = &node.children[0];
        assert_eq!(inner.children[0].text_content(), ":");
    }

    #[test]
    fn label_is_a_captioned_div() {
        let node = Label::new("minutes").render();
        assert_eq!(node.attributes.get("class").unwrap(), "flip-clock-label");
        assert_eq!(node.children[0].text_content(), "minutes");
    }

    #[test]
    fn group_renders_caption_then_items() {
        let group = Group::new(vec![
            Box::new(Divider::new(':')),
            Box::new(Divider::new('.')),
        ])
        .with_label("seconds");
        let node = group.render();
        assert_eq!(node.attributes.get("class").unwrap(), "flip-clock-group");
        assert_eq!(node.children.len(), 2);
        assert_eq!(node.children[0].attributes.get("class").unwrap(), "flip-clock-label");

        let items = &node.children[1];
        assert_eq!(items.attributes.get("class").unwrap(), "flip-clock-group-items");
        assert_eq!(items.children.len(), 2);
    }

    #[test]
    fn unlabeled_group_skips_the_caption() {
        let node = Group::new(vec![Box::new(Divider::default())]).render();
        assert_eq!(node.children.len(), 1);
        assert_eq!(
            node.children[0].attributes.get("class").unwrap(),
            "flip-clock-group-items"
        );
        assert_eq!(node.children[0].kind, NodeKind::Element);
    }
}
