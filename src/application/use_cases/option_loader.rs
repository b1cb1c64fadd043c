use crate::domain::csv::CsvTable;
use crate::domain::error::{AppError, Result};
use crate::domain::options::{
    sorted_options, OptionCatalog, CROP_COLUMN, DISTRICT_COLUMN, SOIL_COLUMN, SOIL_SEPARATORS,
};
use crate::infrastructure::csv::{CsvParser, CsvSource};
use std::collections::HashSet;

/// Loads dropdown choices from the reference dataset. Every call refetches
/// and rebuilds the lists; nothing is cached between loads.
pub struct OptionLoaderUseCase {
    source: Box<dyn CsvSource + Send + Sync>,
    parser: CsvParser,
}

impl OptionLoaderUseCase {
    pub fn new(source: Box<dyn CsvSource + Send + Sync>) -> Self {
        Self {
            source,
            parser: CsvParser::new(),
        }
    }

    pub async fn load_options(&self) -> Result<OptionCatalog> {
        let table = self.fetch_table().await?;
        let catalog = extract_options(&table)?;

        tracing::info!(
            source = %self.source.describe(),
            crops = catalog.crops.len(),
            districts = catalog.districts.len(),
            soils = catalog.soils.len(),
            "Options loaded"
        );

        Ok(catalog)
    }

    pub async fn load_districts(&self) -> Result<Vec<String>> {
        let table = self.fetch_table().await?;
        extract_districts(&table)
    }

    async fn fetch_table(&self) -> Result<CsvTable> {
        let bytes = self.source.fetch().await.map_err(|err| {
            tracing::warn!(source = %self.source.describe(), error = %err, "CSV fetch failed");
            err
        })?;

        let table = self
            .parser
            .parse_bytes(&bytes)
            .map_err(|err| AppError::LoadError(err.message().to_string()))?;

        if table.is_empty() {
            return Err(AppError::LoadError("CSV is empty".to_string()));
        }

        Ok(table)
    }
}

/// Crop, district and soil choices. All three columns must be present.
pub fn extract_options(table: &CsvTable) -> Result<OptionCatalog> {
    let (Some(crop_idx), Some(district_idx), Some(soil_idx)) = (
        table.column_index(CROP_COLUMN),
        table.column_index(DISTRICT_COLUMN),
        table.column_index(SOIL_COLUMN),
    ) else {
        return Err(AppError::LoadError(
            "Required columns not found: Crop, District, Soil".to_string(),
        ));
    };

    let mut crops = HashSet::new();
    let mut districts = HashSet::new();
    let mut soils = HashSet::new();

    for record in table.complete_records() {
        insert_non_empty(&mut crops, record.get(crop_idx));
        insert_non_empty(&mut districts, record.get(district_idx));
        if let Some(cell) = record.get(soil_idx) {
            for soil in split_soils(cell) {
                soils.insert(soil.to_string());
            }
        }
    }

    Ok(OptionCatalog {
        crops: sorted_options(crops),
        districts: sorted_options(districts),
        soils: sorted_options(soils),
    })
}

pub fn extract_districts(table: &CsvTable) -> Result<Vec<String>> {
    let district_idx = table
        .column_index(DISTRICT_COLUMN)
        .ok_or_else(|| AppError::LoadError("District column not found".to_string()))?;

    let mut districts = HashSet::new();
    for record in table.complete_records() {
        insert_non_empty(&mut districts, record.get(district_idx));
    }

    Ok(sorted_options(districts))
}

/// A soil cell may list several soils joined by `&`, `|` or `/`.
pub fn split_soils(cell: &str) -> impl Iterator<Item = &str> {
    cell.split(&SOIL_SEPARATORS[..])
        .map(str::trim)
        .filter(|soil| !soil.is_empty())
}

fn insert_non_empty(set: &mut HashSet<String>, value: Option<&str>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        set.insert(value.to_string());
    }
}
