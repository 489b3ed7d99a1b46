//! The outfit browser: shuffle, cursor and color-filter state for the
//! generator page, owned as one explicit object instead of ambient globals.
//!
//! Split across three parts:
//!
//! - `shuffle` — one-time Fisher-Yates permutation per category
//! - `ring`    — per-category circular cursor with an "unselected" sentinel
//! - this module — the `OutfitBrowser` facade: color filtering, explicit
//!   grid selection, mismatch generation, and the display contract the UI
//!   renders from
//!
//! UI events call into here; nothing in here touches the network or egui.

pub mod ring;
pub mod shuffle;

use std::fmt;

use rand::Rng;

use crate::catalog::{Catalog, Category, ClothingItem};
use ring::CursorRing;
use shuffle::shuffled_indices;

pub use ring::Direction;

// ─── Errors ──────────────────────────────────────────────────────────────────

/// Core-level error conditions. All of these are handled locally by the UI
/// layer (diagnostic + no-op); none of them abort the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseError {
    /// Navigation or random jump on a category with no eligible items.
    EmptyCategory(Category),
    /// Explicit selection of an id that is not in the category's active set.
    ItemNotFound { category: Category, id: String },
    /// Save attempted while at least one category is still at the sentinel.
    IncompleteSelection(Vec<Category>),
}

impl fmt::Display for BrowseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BrowseError::EmptyCategory(c) => {
                write!(f, "no items in this category: {}", c)
            }
            BrowseError::ItemNotFound { category, id } => {
                write!(f, "item {} is not in the active {} set", id, category)
            }
            BrowseError::IncompleteSelection(missing) => {
                let names: Vec<&str> = missing.iter().map(Category::as_str).collect();
                write!(f, "select all clothing items first (missing: {})", names.join(", "))
            }
        }
    }
}

// ─── Color filter ────────────────────────────────────────────────────────────

/// Per-category color scope for the active set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ColorFilter {
    /// Wildcard: the full shuffled order.
    #[default]
    All,
    /// Only items whose color matches, case-insensitively.
    Color(String),
}

impl ColorFilter {
    pub fn matches(&self, item: &ClothingItem) -> bool {
        match self {
            ColorFilter::All => true,
            ColorFilter::Color(c) => item.has_color(c),
        }
    }
}

impl fmt::Display for ColorFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorFilter::All => f.write_str("all"),
            ColorFilter::Color(c) => f.write_str(c),
        }
    }
}

// ─── Display contract ────────────────────────────────────────────────────────

/// What a category's display box should show right now.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DisplaySlot<'a> {
    /// Sentinel cursor: render the "?" placeholder glyph.
    Placeholder,
    Item(&'a ClothingItem),
}

impl<'a> DisplaySlot<'a> {
    pub fn item(&self) -> Option<&'a ClothingItem> {
        match *self {
            DisplaySlot::Placeholder => None,
            DisplaySlot::Item(item) => Some(item),
        }
    }
}

/// A complete outfit pick, one item id per category. Produced by
/// [`OutfitBrowser::selection`] only when every cursor is off the sentinel,
/// so a save request can never go out half-filled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutfitSelection {
    pub top_id: String,
    pub bottom_id: String,
    pub footwear_id: String,
}

// ─── Outfit browser ──────────────────────────────────────────────────────────

/// Per-category navigation state: the fixed shuffled order, the ring over
/// the currently active subset, and the filter that produced it.
#[derive(Debug, Clone)]
struct Slot {
    shuffled: Vec<usize>,
    ring: CursorRing,
    filter: ColorFilter,
}

/// The outfit browser state object. Owns the catalog and one [`Slot`] per
/// category; every UI interaction goes through a method here.
pub struct OutfitBrowser {
    catalog: Catalog,
    slots: [Slot; 3],
}

impl OutfitBrowser {
    /// Build the browser, shuffling each category once with the thread RNG.
    pub fn new(catalog: Catalog) -> Self {
        Self::with_rng(catalog, &mut rand::thread_rng())
    }

    /// Like [`OutfitBrowser::new`] with a caller-supplied RNG (seeded in tests).
    pub fn with_rng<R: Rng>(catalog: Catalog, rng: &mut R) -> Self {
        let slots = Category::ALL.map(|category| {
            let shuffled = shuffled_indices(catalog.items(category).len(), rng);
            Slot {
                ring: CursorRing::new(shuffled.clone()),
                shuffled,
                filter: ColorFilter::All,
            }
        });
        log::debug!(
            "outfit browser ready: {} tops, {} bottoms, {} footwear",
            catalog.tops.len(),
            catalog.bottoms.len(),
            catalog.footwear.len()
        );
        Self { catalog, slots }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    fn slot(&self, category: Category) -> &Slot {
        &self.slots[category.index()]
    }

    fn slot_mut(&mut self, category: Category) -> &mut Slot {
        &mut self.slots[category.index()]
    }

    // ── Cursor ring operations ───────────────────────────────────────────────

    /// Prev/next arrow. First press lands on the first active item; after
    /// that the ring wraps around in either direction.
    pub fn advance(
        &mut self,
        category: Category,
        direction: Direction,
    ) -> Result<&ClothingItem, BrowseError> {
        let idx = self
            .slot_mut(category)
            .ring
            .advance(direction)
            .ok_or_else(|| empty_category(category))?;
        Ok(&self.catalog.items(category)[idx])
    }

    /// Random pick within the active set, bypassing the sentinel rule.
    pub fn jump_random(&mut self, category: Category) -> Result<&ClothingItem, BrowseError> {
        self.jump_random_with(category, &mut rand::thread_rng())
    }

    pub fn jump_random_with<R: Rng>(
        &mut self,
        category: Category,
        rng: &mut R,
    ) -> Result<&ClothingItem, BrowseError> {
        let idx = self
            .slot_mut(category)
            .ring
            .jump_random(rng)
            .ok_or_else(|| empty_category(category))?;
        Ok(&self.catalog.items(category)[idx])
    }

    /// Force the sentinel back onto a category.
    pub fn reset(&mut self, category: Category) {
        self.slot_mut(category).ring.reset();
    }

    /// Select an item picked directly from the filter grid. The cursor moves
    /// to the item's position within the *current* active set, so the arrows
    /// keep navigating the filtered ring from there.
    pub fn select_explicit(
        &mut self,
        category: Category,
        id: &str,
    ) -> Result<&ClothingItem, BrowseError> {
        let not_found = || {
            log::warn!("explicit selection missed: {} in {}", id, category);
            BrowseError::ItemNotFound {
                category,
                id: id.to_string(),
            }
        };

        let idx = self
            .catalog
            .items(category)
            .iter()
            .position(|item| item.id == id)
            .ok_or_else(not_found)?;

        self.slot_mut(category).ring.select(idx).ok_or_else(not_found)?;
        Ok(&self.catalog.items(category)[idx])
    }

    // ── Filter bridge ────────────────────────────────────────────────────────

    /// Re-scope a category's active set. The wildcard restores the full
    /// shuffled order; a color keeps its matching subsequence, in shuffled
    /// order. Always resets that category's cursor; never touches the others.
    pub fn apply_color_filter(&mut self, category: Category, filter: ColorFilter) {
        let active: Vec<usize> = {
            let slot = self.slot(category);
            let items = self.catalog.items(category);
            slot.shuffled
                .iter()
                .copied()
                .filter(|&i| filter.matches(&items[i]))
                .collect()
        };

        log::debug!(
            "filter {} on {}: {} of {} items active",
            filter,
            category,
            active.len(),
            self.catalog.items(category).len()
        );

        let slot = self.slot_mut(category);
        slot.ring.replace_active(active);
        slot.filter = filter;
    }

    pub fn filter(&self, category: Category) -> &ColorFilter {
        &self.slot(category).filter
    }

    /// Colors offered in a category's filter dropdown. Derived from the full
    /// catalog, not the current active subset.
    pub fn available_colors(&self, category: Category) -> Vec<String> {
        self.catalog.colors(category)
    }

    /// Items currently eligible for navigation, in active-set order.
    pub fn active_items(&self, category: Category) -> Vec<&ClothingItem> {
        let items = self.catalog.items(category);
        self.slot(category)
            .ring
            .active()
            .iter()
            .map(|&i| &items[i])
            .collect()
    }

    // ── Render bridge ────────────────────────────────────────────────────────

    /// What the category's display box shows: the item under the cursor, or
    /// the placeholder while at the sentinel.
    pub fn display(&self, category: Category) -> DisplaySlot<'_> {
        match self.slot(category).ring.current() {
            Some(idx) => DisplaySlot::Item(&self.catalog.items(category)[idx]),
            None => DisplaySlot::Placeholder,
        }
    }

    /// Cursor position within the active set (for the "3 / 12" readout).
    pub fn cursor_position(&self, category: Category) -> Option<usize> {
        self.slot(category).ring.position()
    }

    // ── Mismatch generation ──────────────────────────────────────────────────

    /// "Generate mismatched outfit": one independent random pick per
    /// category. Empty categories are skipped; the draws share no state, so
    /// nothing coordinates the combination — that is the point.
    pub fn mismatch(&mut self) {
        self.mismatch_with(&mut rand::thread_rng());
    }

    pub fn mismatch_with<R: Rng>(&mut self, rng: &mut R) {
        for category in Category::ALL {
            match self.slot_mut(category).ring.jump_random(rng) {
                Some(_) => {}
                None => log::warn!("mismatch: skipping empty category {}", category),
            }
        }
    }

    // ── Save precondition ────────────────────────────────────────────────────

    /// The three selected item ids, or `IncompleteSelection` naming every
    /// category still at the sentinel. Checked before any save request.
    pub fn selection(&self) -> Result<OutfitSelection, BrowseError> {
        let mut ids: [Option<&str>; 3] = [None, None, None];
        let mut missing = Vec::new();

        for category in Category::ALL {
            match self.display(category).item() {
                Some(item) => ids[category.index()] = Some(&item.id),
                None => missing.push(category),
            }
        }

        if !missing.is_empty() {
            return Err(BrowseError::IncompleteSelection(missing));
        }

        // All three are present once `missing` is empty.
        Ok(OutfitSelection {
            top_id: ids[Category::Tops.index()].unwrap_or_default().to_string(),
            bottom_id: ids[Category::Bottoms.index()].unwrap_or_default().to_string(),
            footwear_id: ids[Category::Footwear.index()].unwrap_or_default().to_string(),
        })
    }
}

fn empty_category(category: Category) -> BrowseError {
    log::warn!("no items in this category: {}", category);
    BrowseError::EmptyCategory(category)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn item(id: &str, category: Category, color: &str) -> ClothingItem {
        ClothingItem {
            id: id.to_string(),
            category,
            color: (!color.is_empty()).then(|| color.to_string()),
            custom: false,
            image_path: format!("static/images/{}.png", id),
        }
    }

    /// 3 tops, 2 bottoms, 0 footwear: exercises the empty-category paths.
    fn sparse_catalog() -> Catalog {
        Catalog {
            tops: vec![
                item("t1", Category::Tops, "Red"),
                item("t2", Category::Tops, "blue"),
                item("t3", Category::Tops, "red"),
            ],
            bottoms: vec![
                item("b1", Category::Bottoms, "black"),
                item("b2", Category::Bottoms, "Blue"),
            ],
            footwear: Vec::new(),
        }
    }

    fn browser(seed: u64) -> OutfitBrowser {
        OutfitBrowser::with_rng(sparse_catalog(), &mut StdRng::seed_from_u64(seed))
    }

    fn ids(items: &[&ClothingItem]) -> Vec<String> {
        items.iter().map(|i| i.id.clone()).collect()
    }

    #[test]
    fn shuffled_order_is_a_permutation_of_the_catalog() {
        let b = browser(11);
        for category in Category::ALL {
            let mut active = ids(&b.active_items(category));
            active.sort();
            let mut expected: Vec<String> = b
                .catalog()
                .items(category)
                .iter()
                .map(|i| i.id.clone())
                .collect();
            expected.sort();
            assert_eq!(active, expected);
        }
    }

    #[test]
    fn full_traversal_returns_to_first_item() {
        let mut b = browser(1);
        let first = b.advance(Category::Tops, Direction::Forward).unwrap().id.clone();
        for _ in 0..b.active_items(Category::Tops).len() {
            b.advance(Category::Tops, Direction::Forward).unwrap();
        }
        let back = b.display(Category::Tops).item().unwrap().id.clone();
        assert_eq!(first, back);
        assert_eq!(b.cursor_position(Category::Tops), Some(0));
    }

    #[test]
    fn backward_from_first_wraps_to_last() {
        let mut b = browser(2);
        b.advance(Category::Bottoms, Direction::Forward).unwrap();
        b.advance(Category::Bottoms, Direction::Back).unwrap();
        assert_eq!(
            b.cursor_position(Category::Bottoms),
            Some(b.active_items(Category::Bottoms).len() - 1)
        );
    }

    #[test]
    fn empty_category_reports_and_leaves_state_alone() {
        let mut b = browser(3);
        let err = b.advance(Category::Footwear, Direction::Forward).unwrap_err();
        assert_eq!(err, BrowseError::EmptyCategory(Category::Footwear));
        assert_eq!(b.display(Category::Footwear), DisplaySlot::Placeholder);

        let err = b.jump_random_with(Category::Footwear, &mut StdRng::seed_from_u64(0));
        assert_eq!(err.unwrap_err(), BrowseError::EmptyCategory(Category::Footwear));
    }

    #[test]
    fn color_filter_scopes_active_set_and_resets_cursor() {
        let mut b = browser(4);
        b.advance(Category::Tops, Direction::Forward).unwrap();
        assert!(b.cursor_position(Category::Tops).is_some());

        b.apply_color_filter(Category::Tops, ColorFilter::Color("red".into()));

        // Cursor back at the sentinel, active set all red (case-insensitive).
        assert_eq!(b.display(Category::Tops), DisplaySlot::Placeholder);
        let active = b.active_items(Category::Tops);
        assert_eq!(active.len(), 2);
        assert!(active.iter().all(|i| i.has_color("red")));
    }

    #[test]
    fn wildcard_restores_exact_shuffled_order() {
        let mut b = browser(5);
        let before = ids(&b.active_items(Category::Tops));

        b.apply_color_filter(Category::Tops, ColorFilter::Color("blue".into()));
        b.apply_color_filter(Category::Tops, ColorFilter::All);

        // Same membership and same order as before filtering.
        assert_eq!(ids(&b.active_items(Category::Tops)), before);
    }

    #[test]
    fn filtering_one_category_leaves_the_others_alone() {
        let mut b = browser(6);
        b.advance(Category::Bottoms, Direction::Forward).unwrap();
        let bottoms_cursor = b.cursor_position(Category::Bottoms);
        let bottoms_active = ids(&b.active_items(Category::Bottoms));

        b.apply_color_filter(Category::Tops, ColorFilter::Color("red".into()));

        assert_eq!(b.cursor_position(Category::Bottoms), bottoms_cursor);
        assert_eq!(ids(&b.active_items(Category::Bottoms)), bottoms_active);
    }

    #[test]
    fn explicit_selection_continues_within_the_filtered_ring() {
        let mut b = browser(7);
        b.apply_color_filter(Category::Tops, ColorFilter::Color("red".into()));

        let filtered = ids(&b.active_items(Category::Tops));
        assert_eq!(filtered.len(), 2);

        // Pick the first filtered item from the grid, then press next: we
        // must land on the item after it in the filtered set, not whatever
        // follows in the unfiltered shuffled order.
        b.select_explicit(Category::Tops, &filtered[0]).unwrap();
        let next = b.advance(Category::Tops, Direction::Forward).unwrap();
        assert_eq!(next.id, filtered[1]);
    }

    #[test]
    fn explicit_selection_of_filtered_out_item_fails() {
        let mut b = browser(8);
        b.apply_color_filter(Category::Tops, ColorFilter::Color("red".into()));

        let err = b.select_explicit(Category::Tops, "t2").unwrap_err();
        assert_eq!(
            err,
            BrowseError::ItemNotFound {
                category: Category::Tops,
                id: "t2".into()
            }
        );
        assert_eq!(b.display(Category::Tops), DisplaySlot::Placeholder);
    }

    #[test]
    fn mismatch_skips_empty_categories() {
        let mut b = browser(9);
        b.mismatch_with(&mut StdRng::seed_from_u64(123));

        assert!(b.display(Category::Tops).item().is_some());
        assert!(b.display(Category::Bottoms).item().is_some());
        assert_eq!(b.display(Category::Footwear), DisplaySlot::Placeholder);
    }

    #[test]
    fn mismatch_draws_independently_per_category() {
        // Filtering tops must not change which bottoms a mismatch can pick.
        let mut b = browser(10);
        b.apply_color_filter(Category::Tops, ColorFilter::Color("red".into()));
        let mut rng = StdRng::seed_from_u64(77);

        let mut seen_bottoms = std::collections::HashSet::new();
        for _ in 0..200 {
            b.mismatch_with(&mut rng);
            let top = b.display(Category::Tops).item().unwrap();
            assert!(top.has_color("red"));
            seen_bottoms.insert(b.display(Category::Bottoms).item().unwrap().id.clone());
        }
        assert_eq!(seen_bottoms.len(), 2, "both bottoms should be reachable");
    }

    #[test]
    fn selection_requires_all_three_categories() {
        let mut b = browser(12);
        b.advance(Category::Tops, Direction::Forward).unwrap();

        match b.selection() {
            Err(BrowseError::IncompleteSelection(missing)) => {
                assert_eq!(missing, vec![Category::Bottoms, Category::Footwear]);
            }
            other => panic!("expected IncompleteSelection, got {:?}", other),
        }
    }

    #[test]
    fn selection_yields_the_displayed_ids() {
        let mut b = OutfitBrowser::with_rng(
            Catalog {
                tops: vec![item("t1", Category::Tops, "red")],
                bottoms: vec![item("b1", Category::Bottoms, "blue")],
                footwear: vec![item("f1", Category::Footwear, "white")],
            },
            &mut StdRng::seed_from_u64(0),
        );
        b.mismatch_with(&mut StdRng::seed_from_u64(1));

        let sel = b.selection().unwrap();
        assert_eq!(sel.top_id, "t1");
        assert_eq!(sel.bottom_id, "b1");
        assert_eq!(sel.footwear_id, "f1");
    }

    #[test]
    fn available_colors_come_from_the_full_catalog() {
        let mut b = browser(13);
        b.apply_color_filter(Category::Tops, ColorFilter::Color("blue".into()));
        // Still the full palette, first-seen order, case-insensitive dedup.
        assert_eq!(b.available_colors(Category::Tops), vec!["Red", "blue"]);
    }

    #[test]
    fn reset_returns_to_placeholder() {
        let mut b = browser(14);
        b.advance(Category::Tops, Direction::Forward).unwrap();
        b.reset(Category::Tops);
        assert_eq!(b.display(Category::Tops), DisplaySlot::Placeholder);
    }
}
