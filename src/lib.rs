//!Interactive calculator with four floating-point registers A-D.
//!
//!Each command is one whitespace-delimited word whose first character (case-folded) selects the action.
//!Arithmetic always writes its result to register A.

use std::fmt;
use std::io::{self, Write, BufRead};
use phf::phf_map;
use tracing::{debug, info, error};
#[macro_use]
extern crate lazy_static;

mod error;
mod input;

pub use error::CalcError;
pub use input::Tokens;

///width of the menu banner
pub const MENU_WIDTH: usize = 40;

///the four registers
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Reg {
	A, B, C, D
}
impl Reg {
	///case-insensitive, anything outside a-d is not a register
	pub fn from_char(c: char) -> Option<Self> {
		match c.to_ascii_lowercase() {
			'a' => Some(Self::A),
			'b' => Some(Self::B),
			'c' => Some(Self::C),
			'd' => Some(Self::D),
			_ => None
		}
	}
	#[inline(always)]
	pub fn index(self) -> usize {self as usize}
	#[inline(always)]
	///uppercase label
	pub fn letter(self) -> char {(b'A' + self as u8) as char}
}
impl fmt::Display for Reg {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.letter())
	}
}

///binary operators, result goes to A
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
	Add, Sub, Mul, Div
}
impl Op {
	pub fn symbol(self) -> char {
		match self {
			Self::Add => '+',
			Self::Sub => '-',
			Self::Mul => '*',
			Self::Div => '/',
		}
	}
	///plain IEEE result, zero divisors are rejected before this
	pub fn apply(self, l: f64, r: f64) -> f64 {
		match self {
			Self::Add => l + r,
			Self::Sub => l - r,
			Self::Mul => l * r,
			Self::Div => l / r,
		}
	}
}

#[derive(Clone, Copy)]
enum Cmd {
	Set(Reg),
	Arith(Op),
	Clear(Reg),
	Menu,
	Print,
	Quit
}

///dispatch table, keyed by the lowercased first character of a command
static COMMANDS: phf::Map<char, Cmd> = phf_map! {
	'a' => Cmd::Set(Reg::A),
	'b' => Cmd::Set(Reg::B),
	'c' => Cmd::Set(Reg::C),
	'd' => Cmd::Set(Reg::D),
	'+' => Cmd::Arith(Op::Add),
	'-' => Cmd::Arith(Op::Sub),
	'*' => Cmd::Arith(Op::Mul),
	'/' => Cmd::Arith(Op::Div),
	'1' => Cmd::Clear(Reg::A),
	'2' => Cmd::Clear(Reg::B),
	'3' => Cmd::Clear(Reg::C),
	'4' => Cmd::Clear(Reg::D),
	'm' => Cmd::Menu,
	'p' => Cmd::Print,
	'q' => Cmd::Quit,
};

///menu body below the title
const MENU: [&str; 9] = [
	"+\tAdd",
	"-\tSubtract",
	"*\tMultiply",
	"/\tDivide",
	"a-d\tEnter a number for A,B,C,D",
	"1-4\tClear register A,B,C,D",
	"m\tPrints the menu",
	"p\tPrints the registers",
	"q\tQuits the app",
];

///Register storage for one calculator session, all zero by default.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct State {
	regs: [f64; 4]
}
impl State {
	#[cfg(test)]
	///seed all registers at once
	fn custom_regs(mut self, regs: [f64; 4]) -> Self {
		self.regs = regs;
		self
	}
	#[inline(always)]
	pub fn get(&self, r: Reg) -> f64 {self.regs[r.index()]}
	#[inline(always)]
	pub fn set(&mut self, r: Reg, val: f64) {self.regs[r.index()] = val;}
	#[inline(always)]
	pub fn clear(&mut self, r: Reg) {self.set(r, 0.0);}
	#[inline(always)]
	pub fn regs(&self) -> [f64; 4] {self.regs}
}

///Input tokenizer and output stream of a session.
///
///Logs never go here, they are emitted through `tracing`.
pub struct Io<'a> {
	pub input: Tokens<'a>,
	pub output: &'a mut dyn Write
}
impl<'a> Io<'a> {
	pub fn new(input: &'a mut dyn BufRead, output: &'a mut dyn Write) -> Self {
		Self {input: Tokens::new(input), output}
	}

	///print without newline and make sure it's visible before blocking on input
	fn prompt(&mut self, msg: &str) -> io::Result<()> {
		write!(self.output, "{msg}")?;
		self.output.flush()
	}
}

///Number formatting as a default C++ ostream does it (`%g` with 6 significant digits).
pub fn fmt_num(n: f64) -> String {
	if n.is_nan() {return "nan".into();}
	if n.is_infinite() {return if n<0.0 {"-inf"} else {"inf"}.into();}
	if n==0.0 {return if n.is_sign_negative() {"-0"} else {"0"}.into();}

	let sci = format!("{n:.5e}");	//d.ddddde<exp>, rounded to 6 digits
	let (man, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
	let exp: i32 = exp.parse().unwrap_or(0);
	if (-4..6).contains(&exp) {
		trim_frac(&format!("{:.*}", (5-exp) as usize, n))
	}
	else {
		format!("{}e{}{:02}", trim_frac(man), if exp<0 {'-'} else {'+'}, exp.abs())
	}
}

///drop trailing zeros of a fractional part, then a dangling '.'
fn trim_frac(s: &str) -> String {
	if s.contains('.') {s.trim_end_matches('0').trim_end_matches('.').to_string()}
	else {s.to_string()}
}

fn print_line(out: &mut dyn Write) -> io::Result<()> {
	writeln!(out, "{}", "-".repeat(MENU_WIDTH))
}

///banner plus the list of commands
pub fn print_menu(out: &mut dyn Write) -> io::Result<()> {
	print_line(out)?;
	writeln!(out, "{:^w$}", "RegCalc", w = MENU_WIDTH)?;
	print_line(out)?;
	for line in MENU {
		writeln!(out, "{line}")?;
	}
	print_line(out)
}

pub fn print_registers(st: &State, out: &mut dyn Write) -> io::Result<()> {
	let [a, b, c, d] = st.regs.map(fmt_num);
	writeln!(out, "Registers:")?;
	writeln!(out, "A: {a}, B: {b}, C: {c}, D: {d}")
}

///Executes one command word on the given state.
///
///Only the first character matters. Commands that need more input (values, operand registers)
///read it from `io.input` right away. Both operand selectors are read before either is validated.
///
///On `Err` no register has been touched.
pub fn execute(st: &mut State, io: &mut Io, cmd: &str) -> Result<(), CalcError> {
	let cmd_ch = cmd.chars().next().ok_or(CalcError::EmptyCommand)?.to_ascii_lowercase();

	let Some(&kind) = COMMANDS.get(&cmd_ch) else {
		return Err(CalcError::UnknownCommand(cmd_ch));
	};
	match kind {
		Cmd::Set(reg) => {
			io.prompt(&format!("Enter value for register {cmd_ch}: "))?;
			let val = io.input.number()?;
			st.set(reg, val);
			info!("Set {reg} = {}", fmt_num(val));
		},
		Cmd::Arith(op) => {
			io.prompt("Enter the left register: ")?;
			let l = io.input.char()?;
			io.prompt("Enter the right register: ")?;
			let r = io.input.char()?;
			let (Some(l), Some(r)) = (Reg::from_char(l), Reg::from_char(r)) else {
				return Err(CalcError::InvalidRegister);
			};

			let (lv, rv) = (st.get(l), st.get(r));
			if op==Op::Div && rv==0.0 {
				return Err(CalcError::DivisionByZero);
			}
			let res = op.apply(lv, rv);
			st.set(Reg::A, res);
			info!("A = {} {} {} -> A = {}", fmt_num(lv), op.symbol(), fmt_num(rv), fmt_num(res));
			writeln!(io.output, "Result: A = {}", fmt_num(res))?;
		},
		Cmd::Clear(reg) => {
			st.clear(reg);
			info!("Cleared register {reg}");
		},
		Cmd::Menu => {print_menu(io.output)?;},
		Cmd::Print => {print_registers(st, io.output)?;},
		Cmd::Quit => {info!("Exiting RegCalc...");},
	}
	Ok(())
}

///Runs the prompt-execute loop until the word `q` or the end of input.
///
///Matching on `q` is exact: `Q` is dispatched as a quit by `execute` but keeps the loop going.
///Command failures are logged and skipped, only I/O errors end the session early.
pub fn start(st: &mut State, io: &mut Io, menu: bool) -> io::Result<()> {
	if menu {print_menu(io.output)?;}
	loop {
		io.prompt("Enter a command: ")?;
		let Some(cmd) = io.input.token()? else {
			info!("End of input, leaving");
			break;
		};
		debug!("cmd={cmd}");
		match execute(st, io, &cmd) {
			Ok(()) => {},
			Err(e) if e.is_recoverable() => {error!("{e}");},
			Err(CalcError::Io(e)) => {return Err(e);},
			Err(_) => {
				info!("End of input, leaving");
				break;
			},
		}
		if cmd=="q" {break;}
	}
	Ok(())
}
