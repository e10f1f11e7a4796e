use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{PlannerError, Result};
use crate::models::FoodItem;

/// Read-only source of catalog foods.
pub trait FoodCatalog {
    fn get_all_foods(&self) -> Result<Vec<FoodItem>>;
}

impl FoodCatalog for Vec<FoodItem> {
    fn get_all_foods(&self) -> Result<Vec<FoodItem>> {
        Ok(self.clone())
    }
}

const REQUIRED_COLUMNS: [&str; 6] = [
    "name",
    "serving_g",
    "calories_per_100g",
    "protein_g_per_100g",
    "fat_g_per_100g",
    "carbs_g_per_100g",
];

/// One CSV row. Tags are a single comma-separated field.
#[derive(Debug, Serialize, Deserialize)]
struct FoodRecord {
    #[serde(default)]
    id: Option<u32>,
    name: String,
    serving_g: u32,
    calories_per_100g: f64,
    protein_g_per_100g: f64,
    fat_g_per_100g: f64,
    carbs_g_per_100g: f64,
    #[serde(default)]
    tags: String,
}

impl FoodRecord {
    fn into_food(self, row: usize) -> FoodItem {
        FoodItem {
            id: self.id.unwrap_or(row as u32),
            name: self.name.trim().to_string(),
            serving_size_g: self.serving_g,
            calories_per_100g: self.calories_per_100g,
            protein_g_per_100g: self.protein_g_per_100g,
            fat_g_per_100g: self.fat_g_per_100g,
            carbs_g_per_100g: self.carbs_g_per_100g,
            tags: self
                .tags
                .split([',', ';'])
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    fn from_food(food: &FoodItem) -> Self {
        Self {
            id: Some(food.id),
            name: food.name.clone(),
            serving_g: food.serving_size_g,
            calories_per_100g: food.calories_per_100g,
            protein_g_per_100g: food.protein_g_per_100g,
            fat_g_per_100g: food.fat_g_per_100g,
            carbs_g_per_100g: food.carbs_g_per_100g,
            tags: food.tags.iter().cloned().collect::<Vec<_>>().join(","),
        }
    }
}

/// Parse a food CSV.
///
/// Rows that fail to parse or validate are skipped with a warning; a read
/// failure or a header missing a required column fails the whole load.
/// Duplicate names (case-insensitive) keep the position of the first
/// occurrence and the values of the last.
pub fn load_foods_csv<R: Read>(reader: R) -> Result<Vec<FoodItem>> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let headers = rdr.headers()?;
    if let Some(missing) = REQUIRED_COLUMNS.iter().find(|c| !headers.iter().any(|h| h == **c)) {
        return Err(PlannerError::InvalidInput(format!(
            "catalog header is missing column `{missing}`"
        )));
    }

    let mut foods: Vec<FoodItem> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for (i, record) in rdr.deserialize::<FoodRecord>().enumerate() {
        let food = match record {
            Ok(record) => record.into_food(i + 1),
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                warn!(row = i + 1, error = %e, "skipping unreadable catalog row");
                continue;
            }
        };
        if !food.is_valid() {
            warn!(row = i + 1, food = %food.debug_string(), "skipping invalid catalog row");
            continue;
        }

        match index.get(&food.name.to_lowercase()) {
            Some(&pos) => foods[pos] = food,
            None => {
                index.insert(food.name.to_lowercase(), foods.len());
                foods.push(food);
            }
        }
    }

    Ok(foods)
}

/// Write foods as CSV in the same schema `load_foods_csv` reads.
pub fn save_foods_csv<P: AsRef<Path>>(path: P, foods: &[FoodItem]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    for food in foods {
        wtr.serialize(FoodRecord::from_food(food))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Catalog backed by a CSV file, read on every request.
#[derive(Debug, Clone)]
pub struct CsvFoodCatalog {
    path: PathBuf,
}

impl CsvFoodCatalog {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

impl FoodCatalog for CsvFoodCatalog {
    fn get_all_foods(&self) -> Result<Vec<FoodItem>> {
        let file = File::open(&self.path).map_err(|e| unavailable(&self.path, e))?;
        let foods = load_foods_csv(file).map_err(|e| unavailable(&self.path, e))?;

        debug!(path = %self.path.display(), count = foods.len(), "loaded food catalog");
        Ok(foods)
    }
}

fn unavailable(path: &Path, err: impl std::fmt::Display) -> PlannerError {
    PlannerError::CatalogUnavailable(format!("{}: {}", path.display(), err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const CSV: &str = "\
name,serving_g,calories_per_100g,protein_g_per_100g,fat_g_per_100g,carbs_g_per_100g,tags
Peanut Butter,32,588,25,50,20,\"nuts,spread\"
Almond Milk,240,17,0.6,1.1,0.6,\"nuts, dairy-free\"
Oats,40,389,16.9,6.9,66.3,
";

    #[test]
    fn test_load_csv() {
        let foods = load_foods_csv(CSV.as_bytes()).unwrap();

        assert_eq!(foods.len(), 3);
        assert_eq!(foods[0].name, "Peanut Butter");
        assert_eq!(foods[0].id, 1);
        assert!(foods[0].has_tag("spread"));
        assert!(foods[1].has_tag("dairy-free"));
        assert!(foods[2].tags.is_empty());
    }

    #[test]
    fn test_deduplication_keeps_position() {
        let csv = "\
name,serving_g,calories_per_100g,protein_g_per_100g,fat_g_per_100g,carbs_g_per_100g,tags
Apple,100,52,0.3,0.2,14,fruit
Bread,50,265,9,3.2,49,grain
apple,150,52,0.3,0.2,14,fruit
";
        let foods = load_foods_csv(csv.as_bytes()).unwrap();

        assert_eq!(foods.len(), 2);
        assert_eq!(foods[0].name, "apple");
        assert_eq!(foods[0].serving_size_g, 150);
        assert_eq!(foods[1].name, "Bread");
    }

    #[test]
    fn test_invalid_rows_are_skipped() {
        let csv = "\
name,serving_g,calories_per_100g,protein_g_per_100g,fat_g_per_100g,carbs_g_per_100g,tags
Broken,0,100,1,1,1,
Fine,100,100,1,1,1,
";
        let foods = load_foods_csv(csv.as_bytes()).unwrap();
        assert_eq!(foods.len(), 1);
        assert_eq!(foods[0].name, "Fine");
    }

    #[test]
    fn test_csv_catalog_roundtrip() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(CSV.as_bytes()).unwrap();

        let foods = CsvFoodCatalog::new(file.path()).get_all_foods().unwrap();

        let out = NamedTempFile::new().unwrap();
        save_foods_csv(out.path(), &foods).unwrap();
        let reloaded = CsvFoodCatalog::new(out.path()).get_all_foods().unwrap();

        assert_eq!(reloaded, foods);
    }

    #[test]
    fn test_missing_file_is_catalog_unavailable() {
        let result = CsvFoodCatalog::new("/nonexistent/foods.csv").get_all_foods();
        assert!(matches!(result, Err(PlannerError::CatalogUnavailable(_))));
    }

    #[test]
    fn test_malformed_csv_is_catalog_unavailable() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"name,serving_g\nOats,not-a-number\n").unwrap();

        let result = CsvFoodCatalog::new(file.path()).get_all_foods();
        assert!(matches!(result, Err(PlannerError::CatalogUnavailable(_))));
    }

    #[test]
    fn test_unparseable_rows_are_skipped() {
        let csv = "\
name,serving_g,calories_per_100g,protein_g_per_100g,fat_g_per_100g,carbs_g_per_100g,tags
Oats,40,389,16.9,6.9,66.3,grain
Broken,-5,100,1,1,1,
Rice,200,130,2.7,0.3,28,grain
Half Scoop,30.5,400,80,5,8,
";
        let foods = load_foods_csv(csv.as_bytes()).unwrap();

        let names: Vec<&str> = foods.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Oats", "Rice"]);
        assert_eq!(foods[1].id, 3);
    }
}
