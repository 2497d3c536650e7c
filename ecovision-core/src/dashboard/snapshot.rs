use crate::{
    analysis::FieldSummary,
    error::EcovisionError,
    export::{self, ExportSection},
};
use chrono::NaiveDateTime;
use ecovision_schemas::{
    city::City,
    record::{AirRecord, MetricRecord, NoiseRecord, SoilRecord, WaterRecord},
    rule::Assessment,
    selection::{Category, Family, Window},
    series::Series,
};
use serde::Serialize;

/// Everything the dashboard shows for one family.
#[derive(Debug, Clone, Serialize)]
pub struct FamilyPanel<R> {
    pub series: Series<R>,
    pub assessment: Assessment,
    pub summary: Vec<FieldSummary>,
}

/// The result of one dashboard request. Only the selected families are present.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub city: City,
    pub category: Category,
    pub window: Window,
    pub generated_at: NaiveDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub air: Option<FamilyPanel<AirRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub water: Option<FamilyPanel<WaterRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub soil: Option<FamilyPanel<SoilRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub noise: Option<FamilyPanel<NoiseRecord>>,
}

impl DashboardSnapshot {
    pub fn assessments(&self) -> Vec<&Assessment> {
        let mut assessments = Vec::new();
        if let Some(panel) = &self.air {
            assessments.push(&panel.assessment);
        }
        if let Some(panel) = &self.water {
            assessments.push(&panel.assessment);
        }
        if let Some(panel) = &self.soil {
            assessments.push(&panel.assessment);
        }
        if let Some(panel) = &self.noise {
            assessments.push(&panel.assessment);
        }
        assessments
    }

    /// True when no selected family raised an advisory.
    pub fn is_safe(&self) -> bool {
        self.assessments().iter().all(|a| a.is_safe())
    }

    pub fn export_file_name(&self) -> String {
        export::export_file_name(&self.city, self.category, self.window)
    }

    /// Pretty-printed JSON of the whole snapshot.
    pub fn to_json(&self) -> Result<String, EcovisionError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// CSV payload for the selection: a plain table for one family, named blocks
    /// for all of them.
    pub fn export_payload(&self) -> Result<String, EcovisionError> {
        match self.category {
            Category::Single(Family::Air) => single(&self.air),
            Category::Single(Family::Water) => single(&self.water),
            Category::Single(Family::Soil) => single(&self.soil),
            Category::Single(Family::Noise) => single(&self.noise),
            Category::All => {
                let mut sections: Vec<ExportSection> = Vec::new();
                push_section(&mut sections, &self.air)?;
                push_section(&mut sections, &self.water)?;
                push_section(&mut sections, &self.soil)?;
                push_section(&mut sections, &self.noise)?;
                Ok(export::format_sections(&sections))
            }
        }
    }
}

fn single<R: MetricRecord>(panel: &Option<FamilyPanel<R>>) -> Result<String, EcovisionError> {
    match panel {
        Some(panel) => export::format_series(&panel.series),
        None => Err(EcovisionError::FamilyNotGenerated(R::FAMILY)),
    }
}

fn push_section<R: MetricRecord>(
    sections: &mut Vec<ExportSection>,
    panel: &Option<FamilyPanel<R>>,
) -> Result<(), EcovisionError> {
    if let Some(panel) = panel {
        sections.push(export::section(R::FAMILY.name(), &panel.series)?);
    }
    Ok(())
}
