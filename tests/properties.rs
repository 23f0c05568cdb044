//! Property-based tests using proptest.
//!
//! Each property is checked against `Vec` as the reference model, which
//! shares the element semantics but not the growth policy or the cursor
//! validity rules.

use grow_vec::{Error, GrowVec};
use proptest::prelude::*;

// ============================================================================
// STRATEGIES
// ============================================================================

/// Element lists small enough to keep shifting cheap.
fn elements_strategy() -> impl Strategy<Value = Vec<i32>> {
    prop::collection::vec(any::<i32>(), 0..64)
}

/// A list together with an offset in `[0, len]`.
fn elements_and_offset() -> impl Strategy<Value = (Vec<i32>, usize)> {
    elements_strategy().prop_flat_map(|elements| {
        let len = elements.len();
        (Just(elements), 0..=len)
    })
}

/// Advances a fresh cursor `offset` times.
fn cursor_at(vec: &GrowVec<i32>, offset: usize) -> grow_vec::Cursor<i32> {
    let mut cursor = vec.cbegin();
    for _ in 0..offset {
        cursor.advance(vec);
    }
    cursor
}

// ============================================================================
// PROPERTIES
// ============================================================================

proptest! {
    #[test]
    fn prop_push_keeps_capacity_above_len(elements in elements_strategy()) {
        let mut sut = GrowVec::new();
        let mut reallocations = 0u32;
        let mut capacity = sut.capacity();

        for element in &elements {
            sut.push(*element).unwrap();
            prop_assert!(sut.capacity() >= sut.len());
            if sut.capacity() != capacity {
                reallocations += 1;
                capacity = sut.capacity();
            }
        }

        // c' = 2c + 2 means capacity reaches n after at most log2(n + 2) steps.
        let bound = usize::BITS - (elements.len() + 2).leading_zeros();
        prop_assert!(reallocations <= bound);
        prop_assert_eq!(sut.as_slice(), elements.as_slice());
    }

    #[test]
    fn prop_reallocate_below_len_is_rejected(elements in elements_strategy(), shortfall in 1usize..8) {
        prop_assume!(!elements.is_empty());
        let mut sut = GrowVec::from(elements.clone());
        let capacity = sut.capacity();
        let requested = elements.len().saturating_sub(shortfall);

        prop_assert_eq!(
            sut.reallocate(requested),
            Err(Error::CapacityTooSmall { requested, len: elements.len() })
        );
        prop_assert_eq!(sut.capacity(), capacity);
        prop_assert_eq!(sut.as_slice(), elements.as_slice());
    }

    #[test]
    fn prop_clone_is_isolated(elements in elements_strategy(), extra in any::<i32>()) {
        let original = GrowVec::from(elements.clone());
        let mut copy = original.clone();

        prop_assert_eq!(copy.len(), original.len());
        prop_assert_eq!(copy.capacity(), original.capacity());
        prop_assert_eq!(&copy, &original);

        copy.push(extra).unwrap();
        if let Ok(first) = copy.at_mut(0) {
            *first = first.wrapping_add(1);
        }
        prop_assert_eq!(original.as_slice(), elements.as_slice());
    }

    #[test]
    fn prop_insert_then_erase_restores((elements, offset) in elements_and_offset(), value in any::<i32>()) {
        let original = GrowVec::from(elements.clone());
        let mut sut = original.clone();

        let position = cursor_at(&sut, offset);
        prop_assert_eq!(position.offset(), offset);

        let inserted = sut.insert(position, value).unwrap();
        prop_assert_eq!(sut.len(), elements.len() + 1);
        prop_assert_eq!(inserted.get(&sut), Ok(&value));

        let mut model = elements.clone();
        model.insert(offset, value);
        prop_assert_eq!(sut.as_slice(), model.as_slice());

        let (removed, _) = sut.erase(inserted).unwrap();
        prop_assert_eq!(removed, value);
        prop_assert_eq!(&sut, &original);
    }

    #[test]
    fn prop_growth_invalidates_cursors(elements in elements_strategy()) {
        prop_assume!(!elements.is_empty());
        let mut sut = GrowVec::from(elements);
        sut.shrink_to_fit().unwrap();
        let cursor = sut.cbegin();
        prop_assert!(cursor.is_valid(&sut));

        sut.push(0).unwrap();
        prop_assert_eq!(cursor.get(&sut), Err(Error::BadIteratorAccess));
    }

    #[test]
    fn prop_clear_invalidates_cursors((elements, offset) in elements_and_offset()) {
        let mut sut = GrowVec::from(elements);
        let cursor = cursor_at(&sut, offset);
        sut.clear();
        prop_assert_eq!(cursor.get(&sut), Err(Error::BadIteratorAccess));
    }

    #[test]
    fn prop_at_respects_bounds(elements in elements_strategy(), beyond in 0usize..16) {
        let sut = GrowVec::from(elements.clone());

        for (index, element) in elements.iter().enumerate() {
            prop_assert_eq!(sut.at(index), Ok(element));
        }

        let index = elements.len() + beyond;
        prop_assert_eq!(sut.at(index), Err(Error::IndexOutOfBounds { index, len: elements.len() }));
    }

    #[test]
    fn prop_display_matches_join(elements in elements_strategy()) {
        let sut = GrowVec::from(elements.clone());
        let joined = elements.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ");
        prop_assert_eq!(sut.to_string(), format!("[{joined}]"));
    }
}
