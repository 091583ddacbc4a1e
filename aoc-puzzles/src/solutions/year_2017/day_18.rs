use std::collections::VecDeque;

use anyhow::{Context, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use log::trace;

use crate::utils::invalid_input;
use crate::utils::parse::parse_lines;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2017, day = 18, tags = ["vm", "queues"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Reg(usize),
    Imm(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instr {
    Snd(Operand),
    Set(usize, Operand),
    Add(usize, Operand),
    Mul(usize, Operand),
    Mod(usize, Operand),
    Rcv(usize),
    Jgz(Operand, Operand),
}

fn register(token: &str) -> anyhow::Result<usize> {
    match token.as_bytes() {
        [r @ b'a'..=b'z'] => Ok(usize::from(r - b'a')),
        _ => bail!("expected a register, found {token:?}"),
    }
}

fn operand(token: &str) -> anyhow::Result<Operand> {
    register(token).map(Operand::Reg).or_else(|_| {
        token
            .parse()
            .map(Operand::Imm)
            .with_context(|| format!("bad operand {token:?}"))
    })
}

fn parse_instr(line: &str) -> anyhow::Result<Instr> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    Ok(match tokens[..] {
        ["snd", x] => Instr::Snd(operand(x)?),
        ["set", r, y] => Instr::Set(register(r)?, operand(y)?),
        ["add", r, y] => Instr::Add(register(r)?, operand(y)?),
        ["mul", r, y] => Instr::Mul(register(r)?, operand(y)?),
        ["mod", r, y] => Instr::Mod(register(r)?, operand(y)?),
        ["rcv", r] => Instr::Rcv(register(r)?),
        ["jgz", x, y] => Instr::Jgz(operand(x)?, operand(y)?),
        _ => bail!("unknown instruction {line:?}"),
    })
}

/// What a program did when it stopped running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Yield {
    Send(i64),
    /// Waiting on `rcv` into this register
    Receive(usize),
    Terminated,
}

#[derive(Debug, Clone)]
struct Program<'p> {
    code: &'p [Instr],
    regs: [i64; 26],
    pc: i64,
}

impl<'p> Program<'p> {
    fn new(code: &'p [Instr], id: i64) -> Self {
        let mut regs = [0; 26];
        regs[usize::from(b'p' - b'a')] = id;
        Self { code, regs, pc: 0 }
    }

    fn value(&self, op: Operand) -> i64 {
        match op {
            Operand::Reg(r) => self.regs[r],
            Operand::Imm(v) => v,
        }
    }

    fn fetch(&self) -> Option<Instr> {
        let pc = usize::try_from(self.pc).ok()?;
        self.code.get(pc).copied()
    }

    /// Run until the next `snd` or `rcv`, or until the program ends
    fn resume(&mut self) -> anyhow::Result<Yield> {
        while let Some(instr) = self.fetch() {
            self.pc += 1;
            match instr {
                Instr::Snd(x) => return Ok(Yield::Send(self.value(x))),
                Instr::Set(r, y) => self.regs[r] = self.value(y),
                Instr::Add(r, y) => self.regs[r] += self.value(y),
                Instr::Mul(r, y) => self.regs[r] *= self.value(y),
                Instr::Mod(r, y) => {
                    self.regs[r] = self.regs[r]
                        .checked_rem_euclid(self.value(y))
                        .context("mod by zero")?
                }
                Instr::Rcv(r) => return Ok(Yield::Receive(r)),
                Instr::Jgz(x, y) => {
                    if self.value(x) > 0 {
                        self.pc += self.value(y) - 1;
                    }
                }
            }
        }
        Ok(Yield::Terminated)
    }
}

/// Single program: `snd` plays a sound, `rcv` recovers the last one when
/// its register is non-zero
fn first_recovered(code: &[Instr]) -> anyhow::Result<i64> {
    let mut program = Program::new(code, 0);
    let mut last_sound = None;
    loop {
        match program.resume()? {
            Yield::Send(freq) => last_sound = Some(freq),
            Yield::Receive(r) if program.regs[r] != 0 => {
                return last_sound.context("recovered before any sound played");
            }
            Yield::Receive(_) => {}
            Yield::Terminated => bail!("program ended without recovering a frequency"),
        }
    }
}

/// Two programs talking over queues; counts values sent by program 1
/// before both are blocked or finished
fn duet(code: &[Instr]) -> anyhow::Result<usize> {
    let mut programs = [Program::new(code, 0), Program::new(code, 1)];
    let mut inboxes: [VecDeque<i64>; 2] = Default::default();
    let mut waiting: [Option<usize>; 2] = [None, None];
    let mut done = [false, false];
    let mut sent_by_one = 0;

    loop {
        let mut progressed = false;
        for id in 0..2 {
            if done[id] {
                continue;
            }
            if let Some(r) = waiting[id] {
                let Some(value) = inboxes[id].pop_front() else {
                    continue;
                };
                programs[id].regs[r] = value;
                waiting[id] = None;
            }
            progressed = true;
            loop {
                match programs[id].resume()? {
                    Yield::Send(value) => {
                        inboxes[1 - id].push_back(value);
                        if id == 1 {
                            sent_by_one += 1;
                        }
                    }
                    Yield::Receive(r) => match inboxes[id].pop_front() {
                        Some(value) => programs[id].regs[r] = value,
                        None => {
                            waiting[id] = Some(r);
                            break;
                        }
                    },
                    Yield::Terminated => {
                        done[id] = true;
                        break;
                    }
                }
            }
        }
        if !progressed {
            trace!("duet deadlocked after program 1 sent {sent_by_one} values");
            return Ok(sent_by_one);
        }
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Instr>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        parse_lines(input, parse_instr).map_err(invalid_input)
    }
}

impl PartSolver<1> for Solver {
    fn solve(code: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        first_recovered(code)
            .map(|freq| freq.to_string())
            .map_err(crate::utils::solve_failed)
    }
}

impl PartSolver<2> for Solver {
    fn solve(code: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        duet(code)
            .map(|sent| sent.to_string())
            .map_err(crate::utils::solve_failed)
    }
}
