//! Catalog query builder.
//!
//! Folds the optional fields of a [`ProductFilter`] into one conjunctive
//! SeaORM [`Condition`]: each present field adds exactly one term, absent
//! fields add none, and the empty filter yields the identity query.

use sea_orm::sea_query::{Expr, Func};
use sea_orm::{ColumnTrait, Condition};

use super::entities::{perfumer, product};
use crate::domain::ProductFilter;

/// Build the WHERE condition for a marketplace search.
///
/// The caller is expected to join products to perfumers, since the
/// free-text search also matches the owner's display name.
pub fn filter_condition(filter: &ProductFilter) -> Condition {
    let mut cond = Condition::all();

    if let Some(fragrance_type) = present(&filter.fragrance_type) {
        cond = cond.add(product::Column::FragranceType.eq(fragrance_type));
    }

    // Both bounds must be present for the price range to apply; a lone
    // bound is ignored entirely (long-standing marketplace behavior).
    if let (Some(min), Some(max)) = (filter.min_price, filter.max_price) {
        cond = cond.add(product::Column::Price.between(min, max));
    }

    if let Some(search) = present(&filter.search) {
        let term = like_term(search);
        cond = cond.add(
            Condition::any()
                .add(lower(product::Column::Name).like(term.as_str()))
                .add(lower(product::Column::Description).like(term.as_str()))
                .add(lower_perfumer_name().like(term.as_str())),
        );
    }

    if let Some(ingredient) = present(&filter.ingredient) {
        cond = cond.add(lower(product::Column::KeyIngredients).like(like_term(ingredient)));
    }

    if let Some(score) = filter.min_sustainability {
        cond = cond.add(product::Column::SustainabilityScore.gte(score));
    }

    cond
}

/// Query-string parsing turns `?field=` into `Some("")`; an empty value
/// carries no intent, so it contributes no predicate.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

fn like_term(needle: &str) -> String {
    format!("%{}%", needle.to_lowercase())
}

fn lower(column: product::Column) -> Expr {
    Expr::expr(Func::lower(Expr::col((product::Entity, column))))
}

fn lower_perfumer_name() -> Expr {
    Expr::expr(Func::lower(Expr::col((
        perfumer::Entity,
        perfumer::Column::Name,
    ))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::sea_query::JoinType;
    use sea_orm::{DbBackend, EntityTrait, QueryFilter, QuerySelect, QueryTrait, RelationTrait};

    /// Render the search query the same way the product store does.
    fn sql(filter: &ProductFilter) -> String {
        product::Entity::find()
            .join(JoinType::InnerJoin, product::Relation::Perfumer.def())
            .filter(filter_condition(filter))
            .build(DbBackend::Postgres)
            .to_string()
    }

    #[test]
    fn test_empty_filter_is_identity_query() {
        let rendered = sql(&ProductFilter::default());
        assert!(!rendered.contains("WHERE"), "unexpected WHERE in {rendered}");
    }

    #[test]
    fn test_each_field_adds_one_term() {
        let filter = ProductFilter {
            fragrance_type: Some("woody".to_string()),
            min_price: Some(10.0),
            max_price: Some(50.0),
            search: Some("Rose".to_string()),
            ingredient: Some("Oud".to_string()),
            min_sustainability: Some(7.5),
        };
        let rendered = sql(&filter);

        assert!(rendered.contains("WHERE"));
        assert!(rendered.contains("\"fragrance_type\" = 'woody'"));
        assert!(rendered.contains("BETWEEN"));
        assert!(rendered.contains("%rose%"));
        assert!(rendered.contains("%oud%"));
        assert!(rendered.contains(">="));
    }

    #[test]
    fn test_empty_string_fields_apply_no_constraint() {
        // `?fragrance_type=&search=&ingredient=` deserializes to Some("")
        let filter = ProductFilter {
            fragrance_type: Some(String::new()),
            search: Some(String::new()),
            ingredient: Some(String::new()),
            ..Default::default()
        };
        assert!(!sql(&filter).contains("WHERE"));
    }

    #[test]
    fn test_empty_fragrance_type_keeps_other_terms() {
        let filter = ProductFilter {
            fragrance_type: Some(String::new()),
            search: Some("amber".to_string()),
            ..Default::default()
        };
        let rendered = sql(&filter);

        assert!(!rendered.contains("\"fragrance_type\""));
        assert!(rendered.contains("%amber%"));
    }

    #[test]
    fn test_lone_price_bound_applies_no_constraint() {
        let only_min = ProductFilter {
            min_price: Some(10.0),
            ..Default::default()
        };
        let only_max = ProductFilter {
            max_price: Some(50.0),
            ..Default::default()
        };

        assert!(!sql(&only_min).contains("WHERE"));
        assert!(!sql(&only_max).contains("WHERE"));
    }

    #[test]
    fn test_search_matches_name_description_or_owner_name() {
        let filter = ProductFilter {
            search: Some("amber".to_string()),
            ..Default::default()
        };
        let rendered = sql(&filter);

        // Three-way disjunction nested inside the outer conjunction
        assert_eq!(rendered.matches("%amber%").count(), 3);
        assert!(rendered.contains("OR"));
        assert!(rendered.contains("LOWER"));
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let filter = ProductFilter {
            search: Some("AMBER".to_string()),
            ..Default::default()
        };
        assert!(sql(&filter).contains("%amber%"));
    }

    #[test]
    fn test_min_sustainability_is_inclusive_lower_bound() {
        let filter = ProductFilter {
            min_sustainability: Some(5.0),
            ..Default::default()
        };
        let rendered = sql(&filter);
        assert!(rendered.contains("\"sustainability_score\" >= 5"));
    }
}
