//! Archived days, one module per year

pub mod year_2016;
pub mod year_2017;
pub mod year_2021;
pub mod year_2022;
pub mod year_2023;
pub mod year_2024;
pub mod year_2025;

#[cfg(test)]
mod tests {
    use crate::test_support::registry;

    const ARCHIVED: &[(u16, &[u8])] = &[
        (2016, &[1, 12, 13, 17, 23, 25]),
        (2017, &[1, 3, 8, 12, 18, 24]),
        (2021, &[15, 17, 21]),
        (2022, &[12, 18, 21]),
        (2023, &[12, 18, 24]),
        (2024, &[11, 13, 16, 17]),
        (2025, &[1, 5, 6, 8, 9, 10, 11]),
    ];

    #[test]
    fn every_archived_day_is_registered_once() {
        let registry = registry();
        let registered: Vec<(u16, u8)> = registry
            .storage()
            .iter_info()
            .map(|info| (info.year, info.day))
            .collect();
        let expected: Vec<(u16, u8)> = ARCHIVED
            .iter()
            .flat_map(|&(year, days)| days.iter().map(move |&day| (year, day)))
            .collect();
        assert_eq!(registered, expected);
    }

    #[test]
    fn final_day_of_2016_has_one_part() {
        let registry = registry();
        let info = registry.storage().get_info(2016, 25).unwrap();
        assert_eq!(info.parts, 1);
        assert_eq!(registry.storage().get_info(2016, 1).unwrap().parts, 2);
    }
}
