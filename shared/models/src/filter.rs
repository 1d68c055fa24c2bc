//! Pure query engine over a supplier sequence.
//!
//! Every predicate is optional; active predicates AND together, and the
//! search term ORs across name, email, and primary contact name. Output
//! order is fully determined by the sort field, direction, and an id
//! tie-break, so identical inputs always produce identical output.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::str::FromStr;

use uuid::Uuid;

use crate::supplier::Supplier;

/// Resolves a part search term to the ids of suppliers that can supply a
/// matching part. Injected so the engine carries no dependency on where
/// parts live.
pub trait PartsLookup {
    fn suppliers_for_term(&self, term: &str) -> HashSet<Uuid>;
}

/// Scalar fields the listing can be sorted on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortField {
    #[default]
    Name,
    Email,
    Category,
    Status,
    Rating,
    TotalValue,
    JoinDate,
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "name" => Ok(SortField::Name),
            "email" => Ok(SortField::Email),
            "category" => Ok(SortField::Category),
            "status" => Ok(SortField::Status),
            "rating" => Ok(SortField::Rating),
            "total_value" => Ok(SortField::TotalValue),
            "join_date" => Ok(SortField::JoinDate),
            other => Err(format!("unknown sort field '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(format!("unknown sort order '{other}'")),
        }
    }
}

/// A listing request. Absent fields (and the literal `all` for status and
/// category) leave that axis unfiltered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListQuery {
    pub search: Option<String>,
    pub status: Option<String>,
    pub category: Option<String>,
    pub tag: Option<String>,
    pub part: Option<String>,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
}

/// Filters and sorts a supplier sequence. Pure and non-mutating apart from
/// consuming its input vector.
pub fn apply<L>(suppliers: Vec<Supplier>, query: &ListQuery, parts: &L) -> Vec<Supplier>
where
    L: PartsLookup + ?Sized,
{
    let part_matches = active_term(&query.part).map(|term| parts.suppliers_for_term(term));

    let mut filtered: Vec<Supplier> = suppliers
        .into_iter()
        .filter(|supplier| matches(supplier, query, part_matches.as_ref()))
        .collect();

    filtered.sort_by(|a, b| {
        let ordering = compare(a, b, query.sort_by);
        let ordering = match query.sort_order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        };
        ordering.then_with(|| a.id.cmp(&b.id))
    });
    filtered
}

fn active_term(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|term| !term.is_empty())
}

fn active_exact<'a>(value: &'a Option<String>) -> Option<&'a str> {
    active_term(value).filter(|term| !term.eq_ignore_ascii_case("all"))
}

fn matches(supplier: &Supplier, query: &ListQuery, part_matches: Option<&HashSet<Uuid>>) -> bool {
    if let Some(term) = active_term(&query.search) {
        let needle = term.to_lowercase();
        let hit = supplier.name.to_lowercase().contains(&needle)
            || supplier.email.to_lowercase().contains(&needle)
            || supplier.contact_person().to_lowercase().contains(&needle);
        if !hit {
            return false;
        }
    }

    if let Some(status) = active_exact(&query.status) {
        if supplier.status.as_str() != status {
            return false;
        }
    }

    if let Some(category) = active_exact(&query.category) {
        if supplier.category != category {
            return false;
        }
    }

    if let Some(term) = active_term(&query.tag) {
        let needle = term.to_lowercase();
        if !supplier
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(&needle))
        {
            return false;
        }
    }

    if let Some(ids) = part_matches {
        if !ids.contains(&supplier.id) {
            return false;
        }
    }

    true
}

fn compare(a: &Supplier, b: &Supplier, field: SortField) -> Ordering {
    match field {
        SortField::Name => a.name.cmp(&b.name),
        SortField::Email => a.email.cmp(&b.email),
        SortField::Category => a.category.cmp(&b.category),
        SortField::Status => a.status.as_str().cmp(b.status.as_str()),
        SortField::Rating => a.rating.total_cmp(&b.rating),
        SortField::TotalValue => a.total_value.total_cmp(&b.total_value),
        SortField::JoinDate => a.join_date.cmp(&b.join_date),
    }
}
