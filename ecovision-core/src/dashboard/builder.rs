use crate::{dashboard::engine::Dashboard, error::EcovisionError, timeline::current_time};
use chrono::NaiveDateTime;
use ecovision_schemas::{
    city::City,
    selection::{Category, Window},
};

/// A fluent builder for a dashboard request.
///
/// A city must be chosen; the category defaults to every family, the window to
/// the last 24 hours and the reference time to the local wall clock.
#[derive(Debug, Default)]
pub struct DashboardBuilder {
    city: Option<City>,
    category: Option<Category>,
    window: Option<Window>,
    reference_time: Option<NaiveDateTime>,
}

impl DashboardBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_city(mut self, city: City) -> Self {
        self.city = Some(city);
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_window(mut self, window: Window) -> Self {
        self.window = Some(window);
        self
    }

    /// Pins "now" for the request, which fixes the last timestamp of every series.
    pub fn with_reference_time(mut self, reference_time: NaiveDateTime) -> Self {
        self.reference_time = Some(reference_time);
        self
    }

    /// Consumes the builder and returns a ready-to-run `Dashboard`.
    ///
    /// # Errors
    ///
    /// Returns `EcovisionError::CityNotSelected` when no city was provided.
    pub fn build(self) -> Result<Dashboard, EcovisionError> {
        let city = self.city.ok_or(EcovisionError::CityNotSelected)?;
        Ok(Dashboard {
            city,
            category: self.category.unwrap_or_default(),
            window: self.window.unwrap_or_default(),
            reference_time: self.reference_time.unwrap_or_else(current_time),
        })
    }
}
