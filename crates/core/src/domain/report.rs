use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Days a persisted report stays in the store before the expiry sweep may
/// remove it.
pub const REPORT_TTL_DAYS: i64 = 7;

/// Sentinel stored when a submission leaves the details field blank.
pub const DETAILS_PLACEHOLDER: &str = "N/A";

/// Fixed product catalog offered by the report dialog: `(label, slug)`.
pub const PRODUCT_CATALOG: &[(&str, &str)] = &[
    ("Harry Potter Coding Kit", "harry_potter_coding_kit"),
    ("Computer Kit Touch", "computer_kit_touch"),
    ("Computer Kit 2018", "computer_kit_2018"),
    ("Pixel Kit", "pixel_kit"),
    ("Motion Sensor Kit", "motion_sensor_kit"),
];

/// A bug report derived from one dialog submission.
///
/// Reports are write-once: `updated_at` equals `created_at` at write time and
/// no update path exists. `expires_at` is the Unix timestamp at which the
/// store is allowed to drop the row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BugReport {
    pub user_id: String,
    pub user_name: String,
    pub summary: String,
    pub product: String,
    pub details: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub expires_at: i64,
}

impl BugReport {
    /// Build a report from submission fields captured at `now`.
    ///
    /// An empty details string becomes [`DETAILS_PLACEHOLDER`]; non-empty
    /// details pass through unchanged.
    pub fn from_submission(
        user_id: impl Into<String>,
        user_name: impl Into<String>,
        summary: impl Into<String>,
        product: impl Into<String>,
        details: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        let details = details.into();
        let details =
            if details.is_empty() { DETAILS_PLACEHOLDER.to_owned() } else { details };

        Self {
            user_id: user_id.into(),
            user_name: user_name.into(),
            summary: summary.into(),
            product: product.into(),
            details,
            created_at: now,
            updated_at: now,
            expires_at: (now + Duration::days(REPORT_TTL_DAYS)).timestamp(),
        }
    }

    /// Human-readable name of the reported product.
    pub fn product_name(&self) -> String {
        product_title(&self.product)
    }
}

/// Map a product slug to its catalog label, falling back to title-casing the
/// slug for values outside the catalog.
pub fn product_title(slug: &str) -> String {
    if let Some((label, _)) = PRODUCT_CATALOG.iter().find(|(_, value)| *value == slug) {
        return (*label).to_owned();
    }

    slug.split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
