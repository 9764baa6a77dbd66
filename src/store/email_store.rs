use log::{debug, warn};

use crate::domain::email::{Email, EmailId, Event};

/// Owns the email collection and the currently visible subset.
///
/// The visible subset is kept as indices into `all` and is recomputed at the
/// end of every mutation (`search`, `toggle_favorite`). Favorites are never
/// stored; they are derived from `all` on each read.
#[derive(Debug, Clone, Default)]
pub struct EmailStore {
    all: Vec<Email>,
    events: Vec<Event>,
    query: String,
    visible: Vec<usize>,
}

impl EmailStore {
    /// Ids are trusted to be unique; nothing is validated here.
    pub fn new(seed: Vec<Email>) -> Self {
        let visible = (0..seed.len()).collect();
        Self {
            all: seed,
            events: Vec::new(),
            query: String::new(),
            visible,
        }
    }

    pub fn with_events(mut self, events: Vec<Event>) -> Self {
        self.events = events;
        self
    }

    pub fn all(&self) -> &[Email] {
        &self.all
    }

    pub fn visible(&self) -> Vec<&Email> {
        self.visible.iter().map(|&i| &self.all[i]).collect()
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    pub fn favorites(&self) -> Vec<&Email> {
        self.all.iter().filter(|e| e.is_starred).collect()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_filtered(&self) -> bool {
        !self.query.is_empty()
    }

    pub fn len(&self) -> usize {
        self.all.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }

    /// Replaces the current filter. An empty query shows everything.
    pub fn search(&mut self, query: &str) {
        self.query = query.to_string();
        self.refresh_visible();
        debug!(
            "search {:?}: {} of {} visible",
            self.query,
            self.visible.len(),
            self.all.len()
        );
    }

    /// Flips the star of `id` and returns the new value. Unknown ids are a
    /// no-op and yield `None`.
    pub fn toggle_favorite(&mut self, id: EmailId) -> Option<bool> {
        let Some(email) = self.all.iter_mut().find(|e| e.id == id) else {
            warn!("toggle_favorite: no email with id {id}");
            return None;
        };
        email.is_starred = !email.is_starred;
        let starred = email.is_starred;
        debug!("email {id} starred={starred}");

        self.refresh_visible();
        Some(starred)
    }

    pub fn find_by_id(&self, id: EmailId) -> Option<&Email> {
        self.all.iter().find(|e| e.id == id)
    }

    /// First event pointing at `email_id`, if any.
    pub fn event_for(&self, email_id: EmailId) -> Option<&Event> {
        self.events.iter().find(|ev| ev.email_id == email_id)
    }

    fn refresh_visible(&mut self) {
        if self.query.is_empty() {
            self.visible = (0..self.all.len()).collect();
            return;
        }
        let needle: Vec<char> = self.query.chars().collect();
        self.visible = self
            .all
            .iter()
            .enumerate()
            .filter(|(_, e)| e.matches(&needle))
            .map(|(i, _)| i)
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn email(id: EmailId, sender: &str, subject: &str, starred: bool) -> Email {
        Email {
            id,
            sender: sender.into(),
            subject: subject.into(),
            preview: format!("preview {id}"),
            content: format!("content {id}"),
            has_event: false,
            is_starred: starred,
            image_res: String::new(),
        }
    }

    fn ids(list: &[&Email]) -> Vec<EmailId> {
        list.iter().map(|e| e.id).collect()
    }

    fn sample() -> EmailStore {
        EmailStore::new(vec![
            email(
                1,
                "José Manuel López",
                "Confira o relatório de seus investimentos",
                true,
            ),
            email(2, "Eduardo Pereira", "Confirmação de Reunião", false),
            email(3, "Luan Garcia", "Email sem assunto", false),
        ])
    }

    #[test]
    fn new_store_shows_everything() {
        let store = sample();
        assert_eq!(ids(&store.visible()), vec![1, 2, 3]);
        assert!(!store.is_filtered());
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn search_is_case_insensitive_over_sender_and_subject() {
        let mut store = sample();

        store.search("confira");
        assert!(ids(&store.visible()).contains(&1));

        store.search("JOSÉ");
        assert_eq!(ids(&store.visible()), vec![1]);

        store.search("zzz");
        assert!(store.visible().is_empty());
    }

    #[test]
    fn search_does_not_depend_on_letter_position() {
        let mut store = EmailStore::new(vec![
            email(1, "ΟΔΟΣ", "Ταχυδρομείο", false),
            email(2, "Ana", "Viagem a İstanbul", false),
            email(3, "Bia", "istanbul again", false),
        ]);

        store.search("Σ");
        assert_eq!(ids(&store.visible()), vec![1]);

        store.search("İ");
        assert_eq!(ids(&store.visible()), vec![2, 3]);

        store.search("İSTANBUL");
        assert_eq!(ids(&store.visible()), vec![2, 3]);
    }

    #[test]
    fn search_replaces_previous_filter() {
        let mut store = sample();
        store.search("luan");
        assert_eq!(ids(&store.visible()), vec![3]);
        store.search("conf");
        assert_eq!(ids(&store.visible()), vec![1, 2]);
    }

    #[test]
    fn empty_search_restores_all_in_order() {
        let mut store = sample();
        store.search("luan");
        store.search("");
        assert_eq!(ids(&store.visible()), vec![1, 2, 3]);
        assert!(!store.is_filtered());
    }

    #[test]
    fn favorites_follow_all_emails_order() {
        let mut store = EmailStore::new(vec![
            email(1, "a", "x", false),
            email(2, "b", "y", true),
        ]);
        assert_eq!(ids(&store.favorites()), vec![2]);

        assert_eq!(store.toggle_favorite(1), Some(true));
        assert_eq!(ids(&store.favorites()), vec![1, 2]);
    }

    #[test]
    fn favorites_ignore_active_filter() {
        let mut store = sample();
        store.search("luan");
        assert_eq!(ids(&store.favorites()), vec![1]);
    }

    #[test]
    fn toggle_keeps_filter_applied() {
        let mut store = sample();
        store.search("conf");
        store.toggle_favorite(2);
        assert_eq!(ids(&store.visible()), vec![1, 2]);
        assert_eq!(store.query(), "conf");
        assert!(store.find_by_id(2).unwrap().is_starred);
    }

    #[test]
    fn toggle_absent_id_changes_nothing() {
        let mut store = sample();
        store.search("conf");
        let all_before = store.all().to_vec();
        let visible_before: Vec<Email> = store.visible().into_iter().cloned().collect();

        assert_eq!(store.toggle_favorite(999), None);

        assert_eq!(store.all(), all_before.as_slice());
        let visible_after: Vec<Email> = store.visible().into_iter().cloned().collect();
        assert_eq!(visible_after, visible_before);
    }

    #[test]
    fn find_by_id_absent_is_none() {
        let store = sample();
        assert!(store.find_by_id(42).is_none());
        assert_eq!(store.find_by_id(2).map(|e| e.sender.as_str()), Some("Eduardo Pereira"));
    }

    #[test]
    fn event_lookup_by_email_id() {
        let ev = Event {
            id: 10,
            email_id: 2,
            title: "Reunião".into(),
            date: "17/06/2024".into(),
            start_time: "10:00".into(),
            end_time: "11:00".into(),
            link: String::new(),
        };
        let dangling = Event {
            id: 11,
            email_id: 77,
            ..ev.clone()
        };
        let store = sample().with_events(vec![dangling, ev]);
        assert_eq!(store.event_for(2).map(|e| e.id), Some(10));
        assert_eq!(store.event_for(77).map(|e| e.id), Some(11));
        assert!(store.event_for(1).is_none());
    }

    fn arb_emails() -> impl Strategy<Value = Vec<Email>> {
        prop::collection::vec(("[a-zA-Zé ]{0,8}", "[a-zA-Zé ]{0,8}", any::<bool>()), 0..12)
            .prop_map(|rows| {
                rows.into_iter()
                    .enumerate()
                    .map(|(i, (s, subj, star))| email(i as EmailId + 1, &s, &subj, star))
                    .collect()
            })
    }

    proptest! {
        #[test]
        fn favorites_are_exactly_the_starred(seed in arb_emails(), toggles in prop::collection::vec(0u64..15, 0..10)) {
            let mut store = EmailStore::new(seed);
            for id in toggles {
                store.toggle_favorite(id);
                let expected: Vec<EmailId> =
                    store.all().iter().filter(|e| e.is_starred).map(|e| e.id).collect();
                prop_assert_eq!(ids(&store.favorites()), expected);
            }
        }

        #[test]
        fn toggle_touches_only_target_and_is_involutive(seed in arb_emails(), id in 0u64..15) {
            let mut store = EmailStore::new(seed);
            let before = store.all().to_vec();

            store.toggle_favorite(id);
            for (old, new) in before.iter().zip(store.all()) {
                if old.id == id {
                    prop_assert_eq!(old.is_starred, !new.is_starred);
                } else {
                    prop_assert_eq!(old, new);
                }
            }

            store.toggle_favorite(id);
            prop_assert_eq!(store.all(), before.as_slice());
        }

        #[test]
        fn search_matches_filter_definition(seed in arb_emails(), q in "[a-zA-Zé]{0,3}") {
            let mut store = EmailStore::new(seed);
            let before = store.all().to_vec();
            store.search(&q);

            let needle = q.to_lowercase();
            let expected: Vec<EmailId> = before
                .iter()
                .filter(|e| {
                    q.is_empty()
                        || e.sender.to_lowercase().contains(&needle)
                        || e.subject.to_lowercase().contains(&needle)
                })
                .map(|e| e.id)
                .collect();
            prop_assert_eq!(ids(&store.visible()), expected);
            prop_assert_eq!(store.all(), before.as_slice());

            store.search("");
            let all_ids: Vec<EmailId> = before.iter().map(|e| e.id).collect();
            prop_assert_eq!(ids(&store.visible()), all_ids);
        }
    }
}
