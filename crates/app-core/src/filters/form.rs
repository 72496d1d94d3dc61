//! Filter form model
//!
//! Edit buffer of a filter panel while it is open. The buffer is never
//! empty: removing the last row leaves a placeholder behind.

use super::codec::CodecRegistry;
use super::context::FilterContext;
use super::error::{FormError, RowError, RowValidationError};
use super::keys::FilterKey;
use app_state::SearchParams;
use serde::{Deserialize, Serialize};

/// Result type for form edits
pub type Result<T> = std::result::Result<T, FormError>;

/// One row of the filter form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterRow {
    /// Selected filter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_type: Option<FilterKey>,

    /// Raw address value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    /// Row mirrors a static filter and cannot be edited or removed
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub disabled: bool,
}

impl FilterRow {
    /// Empty "add filter" slot
    pub fn placeholder() -> Self {
        Self::default()
    }

    /// Row with a filter and its value
    pub fn new(filter_type: FilterKey, value: impl Into<String>) -> Self {
        Self {
            filter_type: Some(filter_type),
            value: Some(value.into()),
            disabled: false,
        }
    }

    /// Row mirroring a static filter
    pub fn locked(filter_type: FilterKey, value: impl Into<String>) -> Self {
        Self {
            disabled: true,
            ..Self::new(filter_type, value)
        }
    }

    /// Check for the empty slot
    pub fn is_placeholder(&self) -> bool {
        self.filter_type.is_none() && self.value.is_none()
    }

    /// Filter and value of a row ready to be committed
    pub fn committed(&self) -> Option<(FilterKey, &str)> {
        match (self.filter_type, self.value.as_deref()) {
            (Some(key), Some(value)) => Some((key, value)),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
struct RawFormValues {
    #[serde(default)]
    filters: Vec<FilterRow>,
}

impl From<RawFormValues> for FiltersFormValues {
    fn from(raw: RawFormValues) -> Self {
        FiltersFormValues::from_rows(raw.filters)
    }
}

/// Rows of the filter form, never empty
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawFormValues")]
pub struct FiltersFormValues {
    filters: Vec<FilterRow>,
}

impl Default for FiltersFormValues {
    fn default() -> Self {
        Self::new()
    }
}

impl FiltersFormValues {
    /// Form holding one placeholder row
    pub fn new() -> Self {
        Self {
            filters: vec![FilterRow::placeholder()],
        }
    }

    /// Form holding `rows`, or a placeholder when there are none
    pub fn from_rows(rows: impl IntoIterator<Item = FilterRow>) -> Self {
        let filters: Vec<FilterRow> = rows.into_iter().collect();
        if filters.is_empty() {
            Self::new()
        } else {
            Self { filters }
        }
    }

    /// All rows in display order
    pub fn rows(&self) -> &[FilterRow] {
        &self.filters
    }

    /// Row at `index`
    pub fn row(&self, index: usize) -> Option<&FilterRow> {
        self.filters.get(index)
    }

    /// Append a placeholder row and return its index
    pub fn add_row(&mut self) -> usize {
        self.filters.push(FilterRow::placeholder());
        self.filters.len() - 1
    }

    /// Remove the row at `index`
    pub fn remove_row(&mut self, index: usize) -> Result<FilterRow> {
        self.editable(index)?;
        let removed = self.filters.remove(index);
        if self.filters.is_empty() {
            self.filters.push(FilterRow::placeholder());
        }
        Ok(removed)
    }

    /// Select a filter on the row at `index`
    ///
    /// Switching to another filter clears the value, which was encoded for the
    /// previous filter's kind.
    pub fn set_filter_type(&mut self, index: usize, filter_type: Option<FilterKey>) -> Result<()> {
        let row = self.editable(index)?;
        if row.filter_type != filter_type {
            row.filter_type = filter_type;
            row.value = None;
        }
        Ok(())
    }

    /// Set the raw value of the row at `index`
    pub fn set_value(&mut self, index: usize, value: Option<String>) -> Result<()> {
        self.editable(index)?.value = value;
        Ok(())
    }

    /// Rows ready to be committed, in order
    pub fn committed(&self) -> impl Iterator<Item = (FilterKey, &str)> {
        self.filters.iter().filter_map(FilterRow::committed)
    }

    /// Structural checks of every row with a selected filter
    ///
    /// Rows without a filter are dropped on commit and never fail.
    pub fn validate(&self, registry: &CodecRegistry) -> Result<()> {
        let failures: Vec<RowValidationError> = self
            .filters
            .iter()
            .enumerate()
            .filter_map(|(index, row)| {
                let key = row.filter_type?;
                let outcome = match row.value.as_deref() {
                    Some(value) => registry.validate(key, value),
                    None => Err(RowError::MissingValue),
                };
                outcome
                    .err()
                    .map(|error| RowValidationError { index, key, error })
            })
            .collect();

        if failures.is_empty() {
            Ok(())
        } else {
            tracing::debug!(failures = failures.len(), "Filter form failed validation");
            Err(FormError::Validation(failures))
        }
    }

    fn editable(&mut self, index: usize) -> Result<&mut FilterRow> {
        let len = self.filters.len();
        let row = self
            .filters
            .get_mut(index)
            .ok_or(FormError::RowOutOfRange { index, len })?;
        if row.disabled {
            return Err(FormError::RowLocked(index));
        }
        Ok(row)
    }
}

/// Where the initial rows of a form come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormSource {
    /// Current address entries of the panel
    Url,
    /// Static filters only, the "clear all" state
    Default,
}

/// Build the rows shown when a panel opens
///
/// `scoped` holds the panel's address entries with the prefix already
/// stripped. Keys the panel does not accept are dropped; for repeated keys the
/// first value wins. Static-only filters come back locked.
pub fn initial_form_values(
    scoped: &SearchParams,
    context: &FilterContext,
    source: FormSource,
) -> FiltersFormValues {
    let row_for = |key: FilterKey, value: &str| FilterRow {
        disabled: context.is_static_only(key),
        ..FilterRow::new(key, value)
    };

    let rows: Vec<FilterRow> = match source {
        FormSource::Url => {
            let mut seen = Vec::new();
            scoped
                .iter()
                .filter_map(|(name, value)| {
                    let key = context.accepts_name(name)?;
                    if seen.contains(&key) {
                        return None;
                    }
                    seen.push(key);
                    Some(row_for(key, value))
                })
                .collect()
        }
        FormSource::Default => context
            .static_filters
            .iter()
            .map(|(key, value)| row_for(*key, value))
            .collect(),
    };

    FiltersFormValues::from_rows(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> FilterContext {
        FilterContext::new([FilterKey::Status, FilterKey::Currency, FilterKey::Metadata])
            .with_static(FilterKey::Currency, "eur")
            .with_static(FilterKey::CustomerExternalId, "cus_1|-|Acme")
    }

    #[test]
    fn test_new_form_has_placeholder() {
        let form = FiltersFormValues::new();
        assert_eq!(form.rows().len(), 1);
        assert!(form.rows()[0].is_placeholder());
    }

    #[test]
    fn test_remove_last_row_keeps_placeholder() {
        let mut form = FiltersFormValues::from_rows([FilterRow::new(FilterKey::Status, "draft")]);
        let removed = form.remove_row(0).unwrap();
        assert_eq!(removed.filter_type, Some(FilterKey::Status));
        assert_eq!(form.rows(), &[FilterRow::placeholder()]);
    }

    #[test]
    fn test_locked_rows_reject_edits() {
        let mut form = FiltersFormValues::from_rows([
            FilterRow::locked(FilterKey::CustomerExternalId, "cus_1"),
            FilterRow::placeholder(),
        ]);

        assert_eq!(form.remove_row(0), Err(FormError::RowLocked(0)));
        assert_eq!(
            form.set_filter_type(0, Some(FilterKey::Status)),
            Err(FormError::RowLocked(0))
        );
        assert_eq!(form.set_value(0, None), Err(FormError::RowLocked(0)));
        assert_eq!(
            form.remove_row(5),
            Err(FormError::RowOutOfRange { index: 5, len: 2 })
        );
    }

    #[test]
    fn test_changing_filter_type_resets_value() {
        let mut form = FiltersFormValues::from_rows([FilterRow::new(FilterKey::Status, "draft")]);

        form.set_filter_type(0, Some(FilterKey::Status)).unwrap();
        assert_eq!(form.rows()[0].value.as_deref(), Some("draft"));

        form.set_filter_type(0, Some(FilterKey::Amount)).unwrap();
        assert_eq!(form.rows()[0].value, None);
    }

    #[test]
    fn test_committed_skips_incomplete_rows() {
        let mut form = FiltersFormValues::new();
        let index = form.add_row();
        form.set_filter_type(index, Some(FilterKey::Status)).unwrap();
        form.set_value(index, Some("draft".to_string())).unwrap();
        form.add_row();

        let committed: Vec<_> = form.committed().collect();
        assert_eq!(committed, vec![(FilterKey::Status, "draft")]);
    }

    #[test]
    fn test_validate_reports_every_failing_row() {
        let form = FiltersFormValues::from_rows([
            FilterRow::new(FilterKey::Metadata, "a=1&b"),
            FilterRow::new(FilterKey::Status, "draft"),
            FilterRow::new(FilterKey::IssuingDate, "2024-01-01"),
            FilterRow {
                filter_type: Some(FilterKey::Currency),
                ..FilterRow::default()
            },
            FilterRow::placeholder(),
        ]);

        let Err(FormError::Validation(failures)) = form.validate(CodecRegistry::standard()) else {
            panic!("expected validation failures");
        };
        let summary: Vec<_> = failures.iter().map(|f| (f.index, f.error.clone())).collect();
        assert_eq!(
            summary,
            vec![
                (0, RowError::InvalidMetadataPair { index: 1 }),
                (2, RowError::InvalidDateRange),
                (3, RowError::MissingValue),
            ]
        );
    }

    #[test]
    fn test_initial_values_from_url() {
        let scoped = SearchParams::parse(
            "status=draft&utm=mail&customerExternalId=cus_1|-|Acme&status=voided&amount=isUpTo,,5",
        );
        let form = initial_form_values(&scoped, &context(), FormSource::Url);

        assert_eq!(
            form.rows(),
            &[
                FilterRow::new(FilterKey::Status, "draft"),
                FilterRow::locked(FilterKey::CustomerExternalId, "cus_1|-|Acme"),
            ]
        );
    }

    #[test]
    fn test_initial_values_from_defaults() {
        let form = initial_form_values(&SearchParams::new(), &context(), FormSource::Default);
        assert_eq!(
            form.rows(),
            &[
                FilterRow::new(FilterKey::Currency, "eur"),
                FilterRow::locked(FilterKey::CustomerExternalId, "cus_1|-|Acme"),
            ]
        );
    }

    #[test]
    fn test_initial_values_empty_source() {
        let context = FilterContext::new([FilterKey::Status]);
        let form = initial_form_values(&SearchParams::new(), &context, FormSource::Default);
        assert_eq!(form, FiltersFormValues::new());
    }

    #[test]
    fn test_deserialized_form_is_never_empty() {
        let form: FiltersFormValues = serde_json::from_str(r#"{"filters":[]}"#).unwrap();
        assert_eq!(form, FiltersFormValues::new());

        let form: FiltersFormValues = serde_json::from_str(
            r#"{"filters":[{"filterType":"status","value":"draft","disabled":true}]}"#,
        )
        .unwrap();
        assert_eq!(form.rows(), &[FilterRow::locked(FilterKey::Status, "draft")]);
        assert_eq!(
            serde_json::to_string(&form).unwrap(),
            r#"{"filters":[{"filterType":"status","value":"draft","disabled":true}]}"#
        );
    }
}
