//=========================================================================
// Recipe Matcher
//=========================================================================
//
// Decides whether two combinables satisfy a recipe.
//
// Four checks, any one is sufficient:
//   a.my_key           == b.combine_with_key   (both non-empty)
//   b.my_key           == a.combine_with_key   (both non-empty)
//   a.combine_with_tag == b.tag                (both non-empty)
//   b.combine_with_tag == a.tag                (both non-empty)
//
// Every check has a mirrored partner, so the result never depends on
// operand order.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::combinable::{Combinable, Recipe};

//=== RecipeMatcher =======================================================

/// Pure, commutative recipe evaluation.
pub struct RecipeMatcher;

impl RecipeMatcher {
    /// Returns `true` if `a` and `b` may combine.
    pub fn matches(a: &Combinable, b: &Combinable) -> bool {
        Self::recipes_match(&a.recipe, &b.recipe)
    }

    /// Same as [`RecipeMatcher::matches`], on bare recipes.
    pub fn recipes_match(a: &Recipe, b: &Recipe) -> bool {
        Self::key_match(a, b) || Self::tag_match(a, b)
    }

    fn key_match(a: &Recipe, b: &Recipe) -> bool {
        filled_eq(&a.my_key, &b.combine_with_key) || filled_eq(&b.my_key, &a.combine_with_key)
    }

    fn tag_match(a: &Recipe, b: &Recipe) -> bool {
        filled_eq(&a.combine_with_tag, &b.tag) || filled_eq(&b.combine_with_tag, &a.tag)
    }
}

#[inline]
fn filled_eq(want: &str, have: &str) -> bool {
    !want.is_empty() && want == have
}

//=========================================================================
// Unit Tests
//=========================================================================
