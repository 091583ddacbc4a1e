use std::collections::HashMap;

use anyhow::Context;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use petgraph::algo::is_cyclic_directed;
use petgraph::graph::{DiGraph, NodeIndex};

use crate::utils::dp_cache::{ClosureProblem, DpCache, VecBackend};
use crate::utils::invalid_input;
use crate::utils::parse::parse_lines;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 11, tags = ["graph", "dp"])]
pub struct Solver;

/// Devices and the outputs they feed; always acyclic
#[derive(Debug)]
pub struct Reactor<'a> {
    graph: DiGraph<&'a str, ()>,
    devices: HashMap<&'a str, NodeIndex>,
}

impl<'a> Reactor<'a> {
    fn device(&mut self, name: &'a str) -> NodeIndex {
        *self
            .devices
            .entry(name)
            .or_insert_with(|| self.graph.add_node(name))
    }

    /// Number of distinct paths from `from` to `to`; unknown devices have none
    fn paths(&self, from: &str, to: &str) -> u64 {
        let (Some(&from), Some(&to)) = (self.devices.get(from), self.devices.get(to)) else {
            return 0;
        };
        let counts = ClosureProblem::new(
            |&node: &usize| {
                if node == to.index() {
                    Vec::new()
                } else {
                    self.graph.neighbors(NodeIndex::new(node)).map(|n| n.index()).collect()
                }
            },
            |&node: &usize, deps: Vec<u64>| if node == to.index() { 1 } else { deps.iter().sum() },
        );
        DpCache::new(VecBackend::with_capacity(self.graph.node_count()), counts).get(&from.index())
    }

    /// Paths from `from` to `to` that visit both `via` devices, in either order
    fn paths_via(&self, from: &str, via: [&str; 2], to: &str) -> u64 {
        let [a, b] = via;
        let route = |hops: [&str; 4]| hops.windows(2).map(|w| self.paths(w[0], w[1])).product::<u64>();
        route([from, a, b, to]) + route([from, b, a, to])
    }
}

fn parse_reactor(input: &str) -> anyhow::Result<Reactor<'_>> {
    let wiring = parse_lines(input, |line| {
        let (device, outputs) = line.split_once(':').context("missing `:`")?;
        Ok((device.trim(), outputs.split_whitespace().collect::<Vec<_>>()))
    })?;
    let mut reactor = Reactor {
        graph: DiGraph::new(),
        devices: HashMap::new(),
    };
    for (device, outputs) in wiring {
        let from = reactor.device(device);
        for output in outputs {
            let to = reactor.device(output);
            reactor.graph.add_edge(from, to, ());
        }
    }
    anyhow::ensure!(!is_cyclic_directed(&reactor.graph), "device wiring contains a loop");
    Ok(reactor)
}

impl AocParser for Solver {
    type SharedData<'a> = Reactor<'a>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        parse_reactor(input).map_err(invalid_input)
    }
}

impl PartSolver<1> for Solver {
    fn solve(reactor: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(reactor.paths("you", "out").to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(reactor: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(reactor.paths_via("svr", ["dac", "fft"], "out").to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::answer;
    use indoc::indoc;

    #[test]
    fn paths_from_you() {
        let input = indoc! {"
            aaa: you hhh
            you: bbb ccc
            bbb: ddd eee
            ccc: ddd eee fff
            ddd: ggg
            eee: out
            fff: out
            ggg: out
            hhh: ccc fff iii
            iii: out
        "};
        assert_eq!(answer::<Solver>(input, 1), "5");
    }

    #[test]
    fn paths_through_dac_and_fft() {
        let input = indoc! {"
            svr: aaa bbb
            aaa: fft
            fft: ccc
            bbb: tty
            tty: ccc
            ccc: ddd eee
            ddd: hub
            hub: fff
            eee: dac
            dac: fff
            fff: ggg hhh
            ggg: out
            hhh: out
        "};
        let reactor = Solver::parse(input).unwrap();
        assert_eq!(reactor.paths("svr", "out"), 8);
        assert_eq!(answer::<Solver>(input, 2), "2");
        assert_eq!(answer::<Solver>(input, 1), "0");
    }

    #[test]
    fn loops_are_rejected() {
        assert!(Solver::parse("a: b\nb: c\nc: a").is_err());
    }
}
