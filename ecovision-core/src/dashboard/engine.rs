use super::snapshot::{DashboardSnapshot, FamilyPanel};
use crate::{
    analysis, evaluation,
    generation::{generate_air, generate_noise, generate_soil, generate_water},
};
use chrono::NaiveDateTime;
use ecovision_schemas::{
    city::City,
    record::MetricRecord,
    selection::{Category, Family, Window},
    series::Series,
};
use rand::Rng;
use tracing::{debug, info};

/// A configured dashboard request. Build one with [`DashboardBuilder`](super::DashboardBuilder).
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub(super) city: City,
    pub(super) category: Category,
    pub(super) window: Window,
    pub(super) reference_time: NaiveDateTime,
}

impl Dashboard {
    pub fn city(&self) -> &City {
        &self.city
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn window(&self) -> Window {
        self.window
    }

    /// Generates fresh series for every selected family and assesses them.
    ///
    /// Each call draws new values; nothing is cached between runs.
    pub fn run<R: Rng + ?Sized>(&self, rng: &mut R) -> DashboardSnapshot {
        info!(
            city = %self.city,
            category = %self.category,
            hours = self.window.hours(),
            "generating dashboard snapshot"
        );

        let mut snapshot = DashboardSnapshot {
            city: self.city.clone(),
            category: self.category,
            window: self.window,
            generated_at: self.reference_time,
            air: None,
            water: None,
            soil: None,
            noise: None,
        };

        for family in self.category.families() {
            match family {
                Family::Air => {
                    let series = generate_air(&self.city, self.window, self.reference_time, rng);
                    snapshot.air = Some(panel(series));
                }
                Family::Water => {
                    let series = generate_water(&self.city, self.window, self.reference_time, rng);
                    snapshot.water = Some(panel(series));
                }
                Family::Soil => {
                    let series = generate_soil(&self.city, self.window, self.reference_time, rng);
                    snapshot.soil = Some(panel(series));
                }
                Family::Noise => {
                    let series = generate_noise(&self.city, self.window, self.reference_time, rng);
                    snapshot.noise = Some(panel(series));
                }
            }
        }

        snapshot
    }
}

fn panel<R: MetricRecord>(series: Series<R>) -> FamilyPanel<R> {
    let assessment = evaluation::assess(&series);
    debug!(
        family = %R::FAMILY,
        records = series.len(),
        advisories = assessment.advisories.len(),
        "assessed series"
    );
    let summary = analysis::summarize(&series);
    FamilyPanel {
        series,
        assessment,
        summary,
    }
}
