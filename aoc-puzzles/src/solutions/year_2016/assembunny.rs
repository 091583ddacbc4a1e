//! Assembunny interpreter shared by 2016 days 12, 23 and 25
//!
//! Registers `a` to `d` are `0..4`. Instructions produced by `tgl` that make
//! no sense (an immediate as a destination) are kept in the program and
//! skipped when executed.

use std::ops::ControlFlow;

use anyhow::{Context, Result, bail};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Reg(usize),
    Imm(i64),
}

impl Operand {
    fn parse(token: &str) -> Result<Self> {
        match token.as_bytes() {
            [r @ b'a'..=b'd'] => Ok(Operand::Reg(usize::from(r - b'a'))),
            _ => token
                .parse()
                .map(Operand::Imm)
                .with_context(|| format!("bad operand {token:?}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instr {
    Cpy(Operand, Operand),
    Inc(Operand),
    Dec(Operand),
    Jnz(Operand, Operand),
    Tgl(Operand),
    Out(Operand),
}

impl Instr {
    fn parse(line: &str) -> Result<Self> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let ops = tokens[1..]
            .iter()
            .map(|t| Operand::parse(t))
            .collect::<Result<Vec<_>>>()?;
        Ok(match (tokens[0], ops.as_slice()) {
            ("cpy", &[x, y]) => Instr::Cpy(x, y),
            ("inc", &[x]) => Instr::Inc(x),
            ("dec", &[x]) => Instr::Dec(x),
            ("jnz", &[x, y]) => Instr::Jnz(x, y),
            ("tgl", &[x]) => Instr::Tgl(x),
            ("out", &[x]) => Instr::Out(x),
            _ => bail!("unknown instruction {line:?}"),
        })
    }

    fn toggled(self) -> Self {
        match self {
            Instr::Inc(x) => Instr::Dec(x),
            Instr::Dec(x) | Instr::Tgl(x) | Instr::Out(x) => Instr::Inc(x),
            Instr::Jnz(x, y) => Instr::Cpy(x, y),
            Instr::Cpy(x, y) => Instr::Jnz(x, y),
        }
    }
}

/// Parse a whole program, one instruction per line
pub fn parse_program(input: &str) -> Result<Vec<Instr>> {
    crate::utils::parse::parse_lines(input, Instr::parse)
}

/// Why [`Machine::run`] returned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Halt {
    /// The program counter left the program
    Finished,
    /// The `out` callback asked to stop
    Interrupted,
    /// The step limit ran out first
    OutOfSteps,
}

#[derive(Debug, Clone)]
pub struct Machine {
    pub regs: [i64; 4],
    program: Vec<Instr>,
    pc: i64,
    step_limit: Option<u64>,
}

impl Machine {
    pub fn new(program: Vec<Instr>, regs: [i64; 4]) -> Self {
        Self {
            regs,
            program,
            pc: 0,
            step_limit: None,
        }
    }

    /// Stop with [`Halt::OutOfSteps`] after `steps` instructions; a fused
    /// loop counts as one
    pub fn with_step_limit(mut self, steps: u64) -> Self {
        self.step_limit = Some(steps);
        self
    }

    fn fetch(&self) -> Option<Instr> {
        usize::try_from(self.pc)
            .ok()
            .and_then(|pc| self.program.get(pc))
            .copied()
    }

    fn value(&self, op: Operand) -> i64 {
        match op {
            Operand::Reg(r) => self.regs[r],
            Operand::Imm(v) => v,
        }
    }

    /// Run until the program ends or `out` breaks
    pub fn run(&mut self, mut out: impl FnMut(i64) -> ControlFlow<()>) -> Halt {
        let mut steps = 0;
        while let Some(instr) = self.fetch() {
            if self.step_limit.is_some_and(|limit| steps >= limit) {
                return Halt::OutOfSteps;
            }
            steps += 1;
            if let Some(skip) = self.fused(self.pc as usize) {
                self.pc += skip;
                continue;
            }
            let mut next = self.pc + 1;
            match instr {
                Instr::Cpy(src, Operand::Reg(r)) => self.regs[r] = self.value(src),
                Instr::Inc(Operand::Reg(r)) => self.regs[r] += 1,
                Instr::Dec(Operand::Reg(r)) => self.regs[r] -= 1,
                Instr::Jnz(cond, offset) => {
                    if self.value(cond) != 0 {
                        next = self.pc + self.value(offset);
                    }
                }
                Instr::Tgl(offset) => self.toggle(self.pc + self.value(offset)),
                Instr::Out(x) => {
                    self.pc = next;
                    if out(self.value(x)).is_break() {
                        return Halt::Interrupted;
                    }
                    continue;
                }
                Instr::Cpy(_, Operand::Imm(_))
                | Instr::Inc(Operand::Imm(_))
                | Instr::Dec(Operand::Imm(_)) => {}
            }
            self.pc = next;
        }
        Halt::Finished
    }

    /// Run to completion, ignoring output
    pub fn run_to_end(&mut self) {
        self.run(|_| ControlFlow::Continue(()));
    }

    fn toggle(&mut self, target: i64) {
        if let Some(instr) = usize::try_from(target)
            .ok()
            .and_then(|t| self.program.get_mut(t))
        {
            *instr = instr.toggled();
        }
    }

    /// `inc t; dec c; jnz c -2` (either order of the first two)
    fn add_loop(&self, at: usize) -> Option<(usize, usize)> {
        use Instr::*;
        use Operand::*;
        match self.program.get(at..at + 3)? {
            [Inc(Reg(t)), Dec(Reg(c)), Jnz(Reg(j), Imm(-2))]
            | [Dec(Reg(c)), Inc(Reg(t)), Jnz(Reg(j), Imm(-2))]
                if c == j && t != c =>
            {
                Some((*t, *c))
            }
            _ => None,
        }
    }

    /// `cpy s c; <add loop t += c>; dec d; jnz d -5`
    fn mul_loop(&self, at: usize) -> Option<(Operand, usize, usize, usize)> {
        use Instr::*;
        use Operand::*;
        let Cpy(src, Reg(inner)) = *self.program.get(at)? else {
            return None;
        };
        let (target, counter) = self.add_loop(at + 1)?;
        if counter != inner {
            return None;
        }
        let outer = match self.program.get(at + 4..at + 6)? {
            [Dec(Reg(d)), Jnz(Reg(j), Imm(-5))] if d == j => *d,
            _ => return None,
        };
        let touched = [target, inner, outer];
        let distinct = target != outer && inner != outer;
        let src_free = !matches!(src, Reg(r) if touched.contains(&r));
        (distinct && src_free).then_some((src, target, inner, outer))
    }

    /// Execute a recognised loop in one go, returning how far to jump
    fn fused(&mut self, at: usize) -> Option<i64> {
        if let Some((src, target, inner, outer)) = self.mul_loop(at) {
            let (times, rounds) = (self.value(src), self.regs[outer]);
            if times > 0 && rounds > 0 {
                self.regs[target] += times * rounds;
                self.regs[inner] = 0;
                self.regs[outer] = 0;
                return Some(6);
            }
        }
        if let Some((target, counter)) = self.add_loop(at) {
            let count = self.regs[counter];
            if count > 0 {
                self.regs[target] += count;
                self.regs[counter] = 0;
                return Some(3);
            }
        }
        None
    }
}
