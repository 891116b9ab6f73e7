//! Built-in placeholder gallery.
//!
//! Substituted when the data service answers with an empty page so the
//! widget always has something to show. Ids, timestamps and URLs are fixed so
//! runs are reproducible.

use chrono::{DateTime, Utc};
use vista_model::{GalleryItem, GalleryItemId};

struct Placeholder {
    id: u128,
    title: &'static str,
    description: &'static str,
    category: &'static str,
    seed: &'static str,
    created_at: i64,
}

const PLACEHOLDERS: [Placeholder; 3] = [
    Placeholder {
        id: 0x0193_0000_0000_7000_8000_0000_0000_0001,
        title: "Morning Ridge",
        description: "First light over the eastern ridge.",
        category: "landscape",
        seed: "morning-ridge",
        created_at: 1_704_067_200,
    },
    Placeholder {
        id: 0x0193_0000_0000_7000_8000_0000_0000_0002,
        title: "Harbour Lights",
        description: "Fishing boats waiting out the evening tide.",
        category: "coast",
        seed: "harbour-lights",
        created_at: 1_704_153_600,
    },
    Placeholder {
        id: 0x0193_0000_0000_7000_8000_0000_0000_0003,
        title: "Old Town Steps",
        description: "Stone stairway climbing through the old quarter.",
        category: "city",
        seed: "old-town-steps",
        created_at: 1_704_240_000,
    },
];

/// The fixed placeholder set, in display order.
pub fn placeholder_items() -> Vec<GalleryItem> {
    PLACEHOLDERS
        .iter()
        .enumerate()
        .map(|(position, placeholder)| GalleryItem {
            id: GalleryItemId::from_u128(placeholder.id),
            title: placeholder.title.to_string(),
            description: placeholder.description.to_string(),
            primary_source_url: format!(
                "https://picsum.photos/seed/{}/1600/900",
                placeholder.seed
            ),
            fallback_source_url: format!(
                "https://placehold.co/1600x900/jpg?text={}",
                placeholder.seed
            ),
            category: placeholder.category.to_string(),
            display_order: position as i32,
            created_at: DateTime::<Utc>::from_timestamp(placeholder.created_at, 0)
                .unwrap_or_default(),
            external_reference_id: format!("DEMO-{:04}", position + 1),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn placeholder_set_is_stable() {
        let first = placeholder_items();
        let second = placeholder_items();
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
    }

    #[test]
    fn placeholder_ids_are_unique_and_sources_distinct() {
        let items = placeholder_items();
        let ids: HashSet<_> = items.iter().map(|item| item.id).collect();
        assert_eq!(ids.len(), items.len());
        for item in &items {
            assert!(item.validate().is_ok());
            assert_ne!(item.primary_source_url, item.fallback_source_url);
        }
    }
}
