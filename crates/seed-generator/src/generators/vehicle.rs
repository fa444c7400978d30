//! Vehicle listings with their fuels, colors, images and inspection.

use rand::Rng;
use seed_catalog::VehicleCatalog;

use crate::generator::GeneratorError;
use crate::inspection::InspectionResult;
use crate::model::{NewCar, VehiclePlan, CAR_STATUS_ACTIVE};
use crate::random::{count_in, int_in, pick, pick_many};

pub fn chassis_number(year: i32, index: u32) -> String {
    format!("DEMO{year}{index:08}")
}

pub fn describe(brand: &str, model: &str, submodel: Option<&str>) -> String {
    match submodel.filter(|s| !s.is_empty()) {
        Some(submodel) => {
            format!("Well-maintained {brand} {model} {submodel} in excellent condition")
        }
        None => format!("Well-maintained {brand} {model} in excellent condition"),
    }
}

/// Seats for a body type, falling back to the catalog default.
pub fn seats_for<R: Rng + ?Sized>(rng: &mut R, catalog: &VehicleCatalog, body_type: &str) -> i32 {
    let options = catalog.seat_options(body_type);
    pick(rng, &options).copied().unwrap_or(catalog.default_seats)
}

pub fn doors_for<R: Rng + ?Sized>(rng: &mut R, catalog: &VehicleCatalog, body_type: &str) -> i32 {
    let options = catalog.door_options(body_type);
    pick(rng, &options).copied().unwrap_or(catalog.default_doors)
}

/// Build vehicle `index` for `seller_id`. `province_id` stays unset when no
/// provinces are known.
pub fn generate_vehicle<R: Rng + ?Sized>(
    rng: &mut R,
    catalog: &VehicleCatalog,
    seller_id: i32,
    index: u32,
    provinces: &[i32],
) -> Result<VehiclePlan, GeneratorError> {
    let ranges = &catalog.ranges;

    let brands: Vec<&String> = catalog.brands.keys().collect();
    let brand = pick(rng, &brands)
        .copied()
        .ok_or(GeneratorError::EmptyPool("vehicles.brands"))?
        .clone();
    let models = catalog
        .brands
        .get(&brand)
        .map(Vec::as_slice)
        .unwrap_or_default();
    let model = pick(rng, models)
        .ok_or(GeneratorError::EmptyPool("vehicles.brands.models"))?
        .clone();
    let submodel = catalog
        .submodels_for(&model)
        .and_then(|pool| pick(rng, pool))
        .cloned();

    let year = int_in(rng, ranges.year) as i32;
    let mileage = int_in(rng, ranges.mileage) as i32;
    let price = (int_in(rng, ranges.price_thousands) * 1000) as i32;
    let province_id = pick(rng, provinces).copied();

    let body_codes: Vec<&str> = catalog.body_types.iter().map(|b| b.code.as_str()).collect();
    let body_type = pick(rng, &body_codes)
        .copied()
        .ok_or(GeneratorError::EmptyPool("vehicles.body_types"))?
        .to_string();
    let transmission = pick(rng, &catalog.transmissions)
        .ok_or(GeneratorError::EmptyPool("vehicles.transmissions"))?
        .clone();
    let drivetrain = pick(rng, &catalog.drivetrains)
        .ok_or(GeneratorError::EmptyPool("vehicles.drivetrains"))?
        .clone();
    let condition_rating = int_in(rng, ranges.condition) as i32;
    let engine_cc = int_in(rng, ranges.engine_cc) as i32;
    let seats = seats_for(rng, catalog, &body_type);
    let doors = doors_for(rng, catalog, &body_type);
    let plate_prefix = pick(rng, &catalog.plate_prefixes)
        .ok_or(GeneratorError::EmptyPool("vehicles.plate_prefixes"))?
        .clone();
    let plate_number = int_in(rng, ranges.plate_number).to_string();

    let fuel_count = count_in(rng, ranges.fuel_count);
    let fuel_types = pick_many(rng, &catalog.fuel_types, fuel_count);
    let color_count = count_in(rng, ranges.color_count);
    let colors = pick_many(rng, &catalog.colors, color_count);
    let image_count = count_in(rng, ranges.image_count);
    let image_files = pick_many(rng, &catalog.image_files, image_count);

    let inspection = InspectionResult::generate(rng);

    let description = describe(&brand, &model, submodel.as_deref());
    let car = NewCar {
        seller_id,
        body_type_code: body_type,
        transmission_code: transmission,
        drivetrain_code: drivetrain,
        brand_name: brand,
        model_name: model,
        submodel_name: submodel,
        chassis_number: chassis_number(year, index),
        year,
        mileage,
        engine_cc,
        seats,
        doors,
        plate_prefix,
        plate_number,
        province_id,
        description,
        price,
        is_flooded: false,
        is_heavily_damaged: false,
        status: CAR_STATUS_ACTIVE.to_string(),
        condition_rating,
    };

    Ok(VehiclePlan {
        car,
        fuel_types,
        colors,
        image_files,
        inspection,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use seed_catalog::Catalog;
    use std::collections::HashSet;

    fn catalog() -> VehicleCatalog {
        Catalog::builtin().unwrap().vehicles
    }

    #[test]
    fn test_chassis_number_format() {
        assert_eq!(chassis_number(2019, 7), "DEMO201900000007");
        assert_eq!(chassis_number(2025, 123), "DEMO202500000123");
    }

    #[test]
    fn test_describe_with_and_without_submodel() {
        assert_eq!(
            describe("HONDA", "Civic", Some("RS")),
            "Well-maintained HONDA Civic RS in excellent condition"
        );
        assert_eq!(
            describe("TESLA", "Model 3", None),
            "Well-maintained TESLA Model 3 in excellent condition"
        );
        assert_eq!(
            describe("TESLA", "Model 3", Some("")),
            "Well-maintained TESLA Model 3 in excellent condition"
        );
    }

    #[test]
    fn test_seats_and_doors_follow_body_type() {
        let catalog = catalog();
        let mut rng = StdRng::seed_from_u64(42);

        for index in 1..=500 {
            let plan = generate_vehicle(&mut rng, &catalog, 1, index, &[1, 2, 3]).unwrap();
            let car = &plan.car;

            let seat_options = catalog.seat_options(&car.body_type_code);
            let door_options = catalog.door_options(&car.body_type_code);
            assert!(seat_options.contains(&car.seats), "{car:?}");
            assert!(door_options.contains(&car.doors), "{car:?}");
        }
    }

    #[test]
    fn test_vehicle_ranges_and_references() {
        let catalog = catalog();
        let mut rng = StdRng::seed_from_u64(7);

        for index in 1..=200 {
            let plan = generate_vehicle(&mut rng, &catalog, 9, index, &[10, 20]).unwrap();
            let car = &plan.car;

            assert_eq!(car.seller_id, 9);
            assert!((2012..=2025).contains(&car.year));
            assert!((5_000..=150_000).contains(&car.mileage));
            assert!((299_000..=2_999_000).contains(&car.price));
            assert_eq!(car.price % 1000, 0);
            assert!((1200..=3500).contains(&car.engine_cc));
            assert!((2..=5).contains(&car.condition_rating));
            assert!(matches!(car.province_id, Some(10) | Some(20)));
            assert_eq!(car.chassis_number, chassis_number(car.year, index));
            assert_eq!(car.status, "active");
            assert!(!car.is_flooded && !car.is_heavily_damaged);

            let models = &catalog.brands[&car.brand_name];
            assert!(models.contains(&car.model_name));
            if let Some(submodel) = &car.submodel_name {
                assert!(catalog.submodels_for(&car.model_name).unwrap().contains(submodel));
            }

            let plate: i32 = car.plate_number.parse().unwrap();
            assert!((1000..=9999).contains(&plate));

            assert!((1..=2).contains(&plan.fuel_types.len()));
            assert!((1..=2).contains(&plan.colors.len()));
            assert!((6..=10).contains(&plan.image_files.len()));

            let distinct: HashSet<_> = plan.image_files.iter().collect();
            assert_eq!(distinct.len(), plan.image_files.len());
        }
    }

    #[test]
    fn test_no_provinces_leaves_province_unset() {
        let catalog = catalog();
        let mut rng = StdRng::seed_from_u64(1);
        let plan = generate_vehicle(&mut rng, &catalog, 1, 1, &[]).unwrap();
        assert!(plan.car.province_id.is_none());
    }

    #[test]
    fn test_empty_brand_pool() {
        let mut catalog = catalog();
        catalog.brands.clear();
        let mut rng = StdRng::seed_from_u64(1);

        let err = generate_vehicle(&mut rng, &catalog, 1, 1, &[]).unwrap_err();
        assert!(matches!(err, GeneratorError::EmptyPool("vehicles.brands")));
    }
}
