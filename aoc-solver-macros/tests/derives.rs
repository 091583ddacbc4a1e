use aoc_solver::{
    AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, RegisterableSolver,
    SolveError, Solver, SolverRegistryBuilder,
};

/// Counts matching bracket pairs; part 2 fails on unbalanced input.
#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2030, day = 7, tags = ["macro-test", "strings"])]
struct Brackets;

impl AocParser for Brackets {
    type SharedData<'a> = &'a str;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        if input.chars().all(|c| c == '(' || c == ')') {
            Ok(input)
        } else {
            Err(ParseError::invalid("only brackets allowed"))
        }
    }
}

impl PartSolver<1> for Brackets {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let floor: i64 = shared.chars().map(|c| if c == '(' { 1 } else { -1 }).sum();
        Ok(floor.to_string())
    }
}

impl PartSolver<2> for Brackets {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut floor = 0i64;
        for (i, c) in shared.chars().enumerate() {
            floor += if c == '(' { 1 } else { -1 };
            if floor < 0 {
                return Ok((i + 1).to_string());
            }
        }
        Err(SolveError::failed("never entered the basement"))
    }
}

/// Registered without tags
#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 1)]
#[aoc(year = 2030, day = 8)]
struct Untagged;

impl AocParser for Untagged {
    type SharedData<'a> = usize;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        Ok(input.len())
    }
}

impl PartSolver<1> for Untagged {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.to_string())
    }
}

#[test]
fn derived_parts_constant() {
    assert_eq!(Brackets::PARTS, 2);
    assert_eq!(Untagged::PARTS, 1);
}

#[test]
fn derived_dispatch() {
    let mut shared = Brackets::parse("()())").unwrap();
    assert_eq!(Brackets::solve_part(&mut shared, 1).unwrap(), "-1");
    assert_eq!(Brackets::solve_part(&mut shared, 2).unwrap(), "5");
    assert!(matches!(
        Brackets::solve_part(&mut shared, 3),
        Err(SolveError::PartNotImplemented(3))
    ));

    let mut balanced = Brackets::parse("(())").unwrap();
    assert!(matches!(
        Brackets::solve_part(&mut balanced, 2),
        Err(SolveError::SolveFailed(_))
    ));
}

#[test]
fn plugins_are_submitted_with_tags() {
    let plugin = aoc_solver::inventory::iter::<aoc_solver::SolverPlugin>()
        .find(|p| p.year == 2030 && p.day == 7)
        .expect("Brackets plugin submitted");
    assert_eq!(plugin.tags, &["macro-test", "strings"]);
    assert_eq!(plugin.solver.parts(), 2);

    let untagged = aoc_solver::inventory::iter::<aoc_solver::SolverPlugin>()
        .find(|p| p.year == 2030 && p.day == 8)
        .expect("Untagged plugin submitted");
    assert!(untagged.tags.is_empty());
}

#[test]
fn tag_filtered_registration() {
    let registry = SolverRegistryBuilder::new()
        .register_solver_plugins(|p| p.tags.contains(&"macro-test"))
        .unwrap()
        .build();

    assert!(registry.storage().contains(2030, 7));
    assert!(!registry.storage().contains(2030, 8));

    let mut solver = registry.create_solver(2030, 7, "))(((").unwrap();
    assert_eq!(solver.solve(1).unwrap().answer, "1");
    assert_eq!(solver.solve(2).unwrap().answer, "1");
    assert!(registry.create_solver(2030, 7, "(x)").is_err());
}
