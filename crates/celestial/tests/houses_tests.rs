use celestial::chart::equal_sector_house;
use celestial::houses::{compute_houses, HouseSystem};
use celestial::time::Instant;

fn noon() -> Instant {
    Instant::from_ymd_hm(2000, 1, 1, 12, 0).unwrap()
}

#[test]
fn test_equal_houses_from_ascendant() {
    let houses = compute_houses(100.0, HouseSystem::Equal, 40.0, -74.0, &noon());
    assert_eq!(houses.system, HouseSystem::Equal);
    for (i, cusp) in houses.cusps.iter().enumerate() {
        let expected = (100.0 + 30.0 * i as f64) % 360.0;
        assert!((cusp - expected).abs() < 1e-9);
    }
}

#[test]
fn test_whole_sign_for_ascendant_35() {
    let houses = compute_houses(35.0, HouseSystem::WholeSign, 0.0, 0.0, &noon());
    let expected = [30.0, 60.0, 90.0, 120.0, 150.0, 180.0, 210.0, 240.0, 270.0, 300.0, 330.0, 0.0];
    assert_eq!(houses.cusps, expected);
    assert_eq!(houses.system, HouseSystem::WholeSign);
}

#[test]
fn test_equal_sector_assignment() {
    assert_eq!(equal_sector_house(45.0, 0.0), 2);
    assert_eq!(equal_sector_house(29.99, 0.0), 1);
    assert_eq!(equal_sector_house(30.0, 0.0), 2);
}

#[cfg(not(feature = "swisseph"))]
#[test]
fn test_precise_systems_fall_back_to_equal() {
    let equal = compute_houses(211.5, HouseSystem::Equal, 51.5, 0.0, &noon());
    for system in [HouseSystem::Koch, HouseSystem::Placidus] {
        let houses = compute_houses(211.5, system, 51.5, 0.0, &noon());
        assert_eq!(houses, equal);
    }
}

#[test]
fn test_precise_systems_fall_back_at_polar_latitudes() {
    let equal = compute_houses(12.0, HouseSystem::Equal, 78.2, 15.6, &noon());
    let koch = compute_houses(12.0, HouseSystem::Koch, 78.2, 15.6, &noon());
    assert_eq!(koch, equal);
}

#[test]
fn test_twelve_cusps_in_range() {
    for system in HouseSystem::ALL {
        for asc in [0.0, 29.999, 181.0, 359.999] {
            let houses = compute_houses(asc, system, -33.9, 18.4, &noon());
            assert_eq!(houses.cusps.len(), 12);
            assert!(houses.cusps.iter().all(|c| (0.0..360.0).contains(c)));
        }
    }
}
