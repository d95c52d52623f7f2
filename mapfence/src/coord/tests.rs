//! Tests for coordinates, distance and tile conversion

use super::*;

fn coord(lat: f64, lon: f64) -> Coordinate {
    Coordinate::new(lat, lon).unwrap()
}

#[test]
fn test_new_rejects_out_of_range_latitude() {
    assert!(matches!(
        Coordinate::new(90.5, 0.0),
        Err(CoordError::InvalidLatitude(_))
    ));
    assert!(matches!(
        Coordinate::new(f64::NAN, 0.0),
        Err(CoordError::InvalidLatitude(_))
    ));
}

#[test]
fn test_new_rejects_out_of_range_longitude() {
    assert!(matches!(
        Coordinate::new(0.0, -180.5),
        Err(CoordError::InvalidLongitude(_))
    ));
}

#[test]
fn test_parse_lat_lon_pair() {
    let c: Coordinate = " 28.6139 , 77.2090".parse().unwrap();
    assert_eq!(c.latitude, 28.6139);
    assert_eq!(c.longitude, 77.2090);

    assert!(matches!(
        "28.6".parse::<Coordinate>(),
        Err(CoordError::Unparseable(_))
    ));
    assert!(matches!(
        "abc,1".parse::<Coordinate>(),
        Err(CoordError::Unparseable(_))
    ));
}

#[test]
fn test_distance_to_self_is_zero() {
    let delhi = DEFAULT_CENTER;
    assert_eq!(distance_meters(&delhi, &delhi), 0.0);
}

#[test]
fn test_one_degree_latitude_is_about_111_km() {
    let d = distance_meters(&coord(0.0, 0.0), &coord(1.0, 0.0));
    assert!((d - 111_195.0).abs() < 50.0, "got {}", d);
}

#[test]
fn test_delhi_to_mumbai() {
    // New Delhi to Mumbai is roughly 1150 km great-circle
    let mumbai = coord(19.0760, 72.8777);
    let d = distance_meters(&DEFAULT_CENTER, &mumbai);
    assert!((1_140_000.0..1_160_000.0).contains(&d), "got {}", d);
}

#[test]
fn test_distance_is_symmetric() {
    let a = coord(51.5074, -0.1278);
    let b = coord(48.8566, 2.3522);
    assert!((distance_meters(&a, &b) - distance_meters(&b, &a)).abs() < 1e-6);
}

#[test]
fn test_antipodal_points_do_not_produce_nan() {
    let d = distance_meters(&coord(0.0, 0.0), &coord(0.0, 180.0));
    assert!(d.is_finite());
    assert!((d - PI * EARTH_RADIUS_M).abs() < 1.0);
}

#[test]
fn test_destination_matches_distance() {
    for bearing in [0.0, 45.0, 90.0, 180.0, 270.0] {
        let target = destination(&DEFAULT_CENTER, bearing, 400.0);
        let d = distance_meters(&DEFAULT_CENTER, &target);
        assert!((d - 400.0).abs() < 0.01, "bearing {}: {}", bearing, d);
    }
}

#[test]
fn test_london_at_zoom_10() {
    let tile = to_tile_coords(&coord(51.5074, -0.1278), 10).unwrap();
    assert_eq!(tile.y, 340);
    assert_eq!(tile.x, 511);
    assert_eq!(tile.zoom, 10);
}

#[test]
fn test_equator_prime_meridian() {
    let tile = to_tile_coords(&coord(0.0, 0.0), 1).unwrap();
    assert_eq!(tile.x, 1);
    assert_eq!(tile.y, 1);
}

#[test]
fn test_east_edge_clamps_to_last_tile() {
    let tile = to_tile_coords(&coord(0.0, 180.0), 2).unwrap();
    assert_eq!(tile.x, 3);
}

#[test]
fn test_tile_rejects_polar_latitude() {
    assert!(matches!(
        to_tile_coords(&coord(89.0, 0.0), 10),
        Err(CoordError::InvalidLatitude(_))
    ));
}

#[test]
fn test_tile_rejects_zoom_above_max() {
    assert!(matches!(
        to_tile_coords(&coord(0.0, 0.0), 20),
        Err(CoordError::InvalidZoom(20))
    ));
}

#[test]
fn test_tile_northwest_corner_is_near_input() {
    let original = coord(40.7128, -74.0060);
    let tile = to_tile_coords(&original, 16).unwrap();
    let corner = tile_to_coordinate(&tile);

    assert!((corner.latitude - original.latitude).abs() < 0.01);
    assert!((corner.longitude - original.longitude).abs() < 0.01);
    assert!(corner.latitude >= original.latitude);
    assert!(corner.longitude <= original.longitude);
}
