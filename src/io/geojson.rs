use crate::geom::create_polyline;
use crate::sun::path::SunPath;
use crate::sun::shadow::ShadowProjection;
use crate::tile::HeatTile;
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, JsonValue};

/// Trait for converting collections of [`HeatTile`]s to GeoJSON.
///
/// Implemented for `[HeatTile]` and `Vec<HeatTile>`.
pub trait HeatTilesToGeoJson {
    /// One Polygon feature per tile with `row`, `col`, `score` and `fill` properties.
    fn to_feature_collection(&self) -> FeatureCollection;
}

impl HeatTilesToGeoJson for [HeatTile] {
    fn to_feature_collection(&self) -> FeatureCollection {
        FeatureCollection {
            bbox: None,
            features: self.iter().map(HeatTile::to_feature).collect(),
            foreign_members: None,
        }
    }
}

impl HeatTilesToGeoJson for Vec<HeatTile> {
    fn to_feature_collection(&self) -> FeatureCollection {
        self.as_slice().to_feature_collection()
    }
}

fn feature(geometry: Option<Geometry>, properties: JsonObject) -> Feature {
    Feature {
        bbox: None,
        geometry,
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

impl HeatTile {
    pub fn to_feature(&self) -> Feature {
        let mut properties = JsonObject::new();
        properties.insert("row".to_string(), JsonValue::from(self.row));
        properties.insert("col".to_string(), JsonValue::from(self.col));
        properties.insert("score".to_string(), JsonValue::from(self.score));
        properties.insert("fill".to_string(), JsonValue::from(self.fill.to_string()));

        feature(Some(Geometry::from(&self.to_polygon())), properties)
    }
}

impl SunPath {
    /// LineString through the shadow tips; the geometry is omitted when
    /// there are fewer than two points.
    pub fn to_geojson(&self) -> Feature {
        let geometry = self
            .is_drawable()
            .then(|| Geometry::from(&self.to_line_string()));

        let hours: Vec<JsonValue> = self.points.iter().map(|p| JsonValue::from(p.hour)).collect();
        let mut properties = JsonObject::new();
        properties.insert("kind".to_string(), JsonValue::from("sun_path"));
        properties.insert(
            "origin".to_string(),
            JsonValue::from(vec![self.origin.longitude, self.origin.latitude]),
        );
        properties.insert("hours".to_string(), JsonValue::Array(hours));

        feature(geometry, properties)
    }
}

impl ShadowProjection {
    /// LineString from the reference object to the shadow tip.
    pub fn to_geojson(&self) -> Feature {
        let line = create_polyline(&[self.origin, self.tip]);

        let mut properties = JsonObject::new();
        properties.insert("kind".to_string(), JsonValue::from("shadow"));
        properties.insert("length_m".to_string(), JsonValue::from(self.length));

        feature(Some(Geometry::from(&line)), properties)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::LatLon;
    use crate::grid::generate_heat_grid;
    use crate::region::GeoRegion;
    use crate::sun::path::SunPathPoint;
    use chrono::{NaiveDate, TimeZone, Utc};
    use geojson::Value;

    #[test]
    fn test_tiles_feature_collection() {
        let date = Utc.with_ymd_and_hms(2024, 6, 21, 0, 0, 0).unwrap();
        let tiles = generate_heat_grid(&GeoRegion::default(), &date, 5);
        let fc = tiles.to_feature_collection();

        assert_eq!(fc.features.len(), tiles.len());
        let first = &fc.features[0];
        assert_eq!(first.property("row"), Some(&JsonValue::from(tiles[0].row)));
        assert_eq!(first.property("score"), Some(&JsonValue::from(tiles[0].score)));
        assert!(first.property("fill").is_some());
        match first.geometry.as_ref().map(|g| &g.value) {
            Some(Value::Polygon(rings)) => assert_eq!(rings[0].len(), 5),
            other => panic!("expected polygon, got {:?}", other),
        }

        let text = fc.to_string();
        assert!(text.contains("FeatureCollection"));
    }

    #[test]
    fn test_sun_path_geometry_needs_two_points() {
        let point = SunPathPoint {
            hour: 12,
            tip: LatLon::new(-0.0001, 0.0),
            elevation_degrees: 45.0,
            bearing_degrees: 180.0,
        };
        let mut path = SunPath {
            origin: LatLon::new(0.0, 0.0),
            date: NaiveDate::from_ymd_opt(2024, 6, 21).unwrap(),
            utc_offset: 0,
            points: vec![point],
        };
        assert!(path.to_geojson().geometry.is_none());

        path.points.push(SunPathPoint { hour: 13, ..point });
        let feature = path.to_geojson();
        assert!(matches!(
            feature.geometry.map(|g| g.value),
            Some(Value::LineString(coords)) if coords.len() == 2
        ));
    }

    #[test]
    fn test_shadow_feature() {
        let shadow = ShadowProjection::from_angles(&(0.0, 0.0), 45.0, 180.0);
        let feature = shadow.to_geojson();
        match feature.geometry.map(|g| g.value) {
            Some(Value::LineString(coords)) => {
                assert_eq!(coords.len(), 2);
                assert_eq!(coords[0], vec![0.0, 0.0]);
                assert!(coords[1][1] < 0.0);
            }
            other => panic!("expected line string, got {:?}", other),
        }
    }
}
