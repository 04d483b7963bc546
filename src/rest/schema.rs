//! Per-entity materialization tables.
//!
//! Every entity type may declare:
//!
//! - a **rename table** correcting inconsistent wire field names,
//! - an **association table** mapping a field to the entity its value
//!   materializes as,
//! - a **computed-field registry** consulted by [`Resource::get`] before the
//!   raw property bag.
//!
//! Entities without a registered schema materialize as plain property bags.

use serde_json::Value;

use crate::rest::Resource;

/// A derived accessor, consulted instead of the raw value of the same field.
pub type ComputedField = fn(&Resource) -> Option<Value>;

/// Materialization tables for one entity type.
///
/// # Example
///
/// ```rust
/// use etsy_api::rest::{EntitySchema, ResourceFactory};
/// use serde_json::json;
///
/// static WIDGET: EntitySchema = EntitySchema::new("Widget")
///     .with_renames(&[("widget_name", "name")])
///     .with_associations(&[("owner", "User")]);
///
/// let widget = ResourceFactory::resource_with_schema(
///     &WIDGET,
///     json!({"widget_name": "Lamp", "owner": {"user_id": 7}}),
/// );
/// assert_eq!(widget.get("name"), Some(json!("Lamp")));
/// assert_eq!(widget.resource("owner").unwrap().entity(), "User");
/// ```
#[derive(Debug)]
pub struct EntitySchema {
    /// The entity type name, e.g. `"Listing"`.
    pub name: &'static str,
    /// `(wire name, canonical name)` pairs, applied before associations.
    pub renames: &'static [(&'static str, &'static str)],
    /// `(field, entity)` pairs. Field matching is case-insensitive.
    pub associations: &'static [(&'static str, &'static str)],
    /// `(field, accessor)` pairs.
    pub computed: &'static [(&'static str, ComputedField)],
}

impl EntitySchema {
    /// Creates a schema with empty tables.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            renames: &[],
            associations: &[],
            computed: &[],
        }
    }

    /// Sets the rename table.
    #[must_use]
    pub const fn with_renames(mut self, renames: &'static [(&'static str, &'static str)]) -> Self {
        self.renames = renames;
        self
    }

    /// Sets the association table.
    #[must_use]
    pub const fn with_associations(
        mut self,
        associations: &'static [(&'static str, &'static str)],
    ) -> Self {
        self.associations = associations;
        self
    }

    /// Sets the computed-field registry.
    #[must_use]
    pub const fn with_computed(mut self, computed: &'static [(&'static str, ComputedField)]) -> Self {
        self.computed = computed;
        self
    }

    /// Returns the canonical name for a wire field, if it is renamed.
    #[must_use]
    pub fn renamed(&self, wire: &str) -> Option<&'static str> {
        self.renames
            .iter()
            .find(|(from, _)| *from == wire)
            .map(|(_, to)| *to)
    }

    /// Returns the entity a field materializes as, if it is an association.
    #[must_use]
    pub fn association(&self, field: &str) -> Option<&'static str> {
        self.associations
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(field))
            .map(|(_, entity)| *entity)
    }

    /// Returns the computed accessor registered for a field.
    #[must_use]
    pub fn computed(&self, field: &str) -> Option<ComputedField> {
        self.computed
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(field))
            .map(|(_, accessor)| *accessor)
    }
}

/// Looks up the registered schema for an entity type.
#[must_use]
pub fn schema_for(entity: &str) -> Option<&'static EntitySchema> {
    crate::rest::resources::SCHEMAS
        .iter()
        .copied()
        .find(|schema| schema.name == entity)
}
