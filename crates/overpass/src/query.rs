use model::{query::SpatialQuery, BoundingBox, Coordinate};

/// Interpreter timeout used when nothing else is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 25;

const ELEMENT_TYPES: [&str; 3] = ["node", "way", "relation"];

/// Builds Overpass QL for a batch of amenity categories. Every category is
/// requested as node, way and relation within one union, and `out center`
/// gives ways and relations a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryBuilder {
    timeout_secs: u64,
}

impl Default for QueryBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT_SECS)
    }
}

impl QueryBuilder {
    pub fn new(timeout_secs: u64) -> Self {
        Self { timeout_secs }
    }

    pub fn build(&self, query: &SpatialQuery) -> String {
        match query {
            SpatialQuery::BoundingBox { categories, bbox } => self.bbox(categories, bbox),
            SpatialQuery::Around {
                categories,
                center,
                radius_meters,
            } => self.radius(categories, center, *radius_meters),
        }
    }

    pub fn bbox<S: AsRef<str>>(&self, categories: &[S], bbox: &BoundingBox) -> String {
        let filter = format!(
            "({},{},{},{})",
            bbox.south(),
            bbox.west(),
            bbox.north(),
            bbox.east()
        );
        self.union(categories, &filter)
    }

    pub fn radius<S: AsRef<str>>(
        &self,
        categories: &[S],
        center: &Coordinate,
        radius_meters: f64,
    ) -> String {
        let filter = format!(
            "(around:{},{},{})",
            radius_meters,
            center.latitude(),
            center.longitude()
        );
        self.union(categories, &filter)
    }

    fn union<S: AsRef<str>>(&self, categories: &[S], filter: &str) -> String {
        let clauses = categories
            .iter()
            .map(|category| sanitize_category(category.as_ref()))
            .filter(|category| !category.is_empty())
            .flat_map(|category| {
                ELEMENT_TYPES
                    .iter()
                    .map(move |element| format!("{}{}[amenity={}];", element, filter, category))
            })
            .collect::<String>();
        format!(
            "[out:json][timeout:{}];({});out center;",
            self.timeout_secs, clauses
        )
    }
}

pub fn build_bbox_query<S: AsRef<str>>(categories: &[S], bbox: &BoundingBox) -> String {
    QueryBuilder::default().bbox(categories, bbox)
}

pub fn build_radius_query<S: AsRef<str>>(
    categories: &[S],
    center: &Coordinate,
    radius_meters: f64,
) -> String {
    QueryBuilder::default().radius(categories, center, radius_meters)
}

/// Keeps only characters that can appear in an amenity value, so a category
/// can not leave its tag filter.
pub fn sanitize_category(category: &str) -> String {
    category
        .trim()
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | ':'))
        .collect()
}
