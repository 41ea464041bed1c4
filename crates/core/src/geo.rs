use crate::model::Location;

/// Longitude and latitude ranges enclosing a set of stores.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoBounds {
    pub longitude: [f64; 2],
    pub latitude: [f64; 2],
}

/// Bounds of every finite location widened by `margin` degrees on each
/// side and clamped to the globe. `None` when nothing is usable.
pub fn geo_bounds<'a>(
    locations: impl IntoIterator<Item = &'a Location>,
    margin: f64,
) -> Option<GeoBounds> {
    let mut bounds: Option<GeoBounds> = None;

    for location in locations {
        let (lon, lat) = (location.longitude, location.latitude);
        if !lon.is_finite() || !lat.is_finite() {
            continue;
        }
        bounds = Some(match bounds {
            None => GeoBounds {
                longitude: [lon, lon],
                latitude: [lat, lat],
            },
            Some(b) => GeoBounds {
                longitude: [b.longitude[0].min(lon), b.longitude[1].max(lon)],
                latitude: [b.latitude[0].min(lat), b.latitude[1].max(lat)],
            },
        });
    }

    bounds.map(|b| GeoBounds {
        longitude: [
            (b.longitude[0] - margin).max(-180.0),
            (b.longitude[1] + margin).min(180.0),
        ],
        latitude: [
            (b.latitude[0] - margin).max(-90.0),
            (b.latitude[1] + margin).min(90.0),
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(latitude: f64, longitude: f64) -> Location {
        Location {
            latitude,
            longitude,
        }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn bounds_enclose_stores_with_margin() {
        let stores = [at(47.6, -122.3), at(46.0, -117.0)];
        let bounds = geo_bounds(&stores, 0.5).unwrap();
        assert!(close(bounds.longitude[0], -122.8) && close(bounds.longitude[1], -116.5));
        assert!(close(bounds.latitude[0], 45.5) && close(bounds.latitude[1], 48.1));
    }

    #[test]
    fn non_finite_coordinates_are_skipped() {
        assert!(geo_bounds(&[at(f64::NAN, 0.0)], 0.5).is_none());
        assert!(geo_bounds(std::iter::empty(), 0.5).is_none());
    }

    #[test]
    fn bounds_are_clamped_to_the_globe() {
        let bounds = geo_bounds(&[at(89.9, 179.9)], 0.5).unwrap();
        assert_eq!(bounds.longitude[1], 180.0);
        assert_eq!(bounds.latitude[1], 90.0);
    }
}
