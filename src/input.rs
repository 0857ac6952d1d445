use std::collections::VecDeque;
use std::io::{self, BufRead};
use regex::Regex;
use crate::CalcError;

lazy_static! {
	///longest decimal literal a stream extraction would accept, ASCII digits only
	static ref NUM_PREFIX: Regex = Regex::new(r"^[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?").unwrap();
}

///Whitespace tokenizer over a line-buffered reader.
///
///Unread characters of the current line are kept, so several inputs can share one line
///and anything a numeric read leaves over becomes the next input.
pub struct Tokens<'a> {
	src: &'a mut dyn BufRead,
	buf: VecDeque<char>,
}

impl<'a> Tokens<'a> {
	pub fn new(src: &'a mut dyn BufRead) -> Self {
		Self {src, buf: VecDeque::new()}
	}

	///skip whitespace, pulling new lines as needed; false at EOF
	fn fill(&mut self) -> io::Result<bool> {
		loop {
			while let Some(c) = self.buf.front() {
				if c.is_whitespace() {self.buf.pop_front();}
				else {return Ok(true);}
			}
			let mut line = Vec::new();
			if self.src.read_until(b'\n', &mut line)? == 0 {
				return Ok(false);
			}
			self.buf.extend(String::from_utf8_lossy(&line).chars());	//bad bytes become U+FFFD
		}
	}

	///next whitespace-delimited word, `None` at EOF
	pub fn token(&mut self) -> io::Result<Option<String>> {
		if !self.fill()? {
			return Ok(None);
		}
		let mut word = String::new();
		while let Some(c) = self.buf.front() {
			if c.is_whitespace() {break;}
			word.push(*c);
			self.buf.pop_front();
		}
		Ok(Some(word))
	}

	///exactly one non-whitespace character
	pub fn char(&mut self) -> Result<char, CalcError> {
		if !self.fill()? {
			return Err(CalcError::EndOfInput);
		}
		self.buf.pop_front().ok_or(CalcError::EndOfInput)
	}

	///Leading decimal literal of the next word.
	///
	///Characters after the literal are put back (`5x` yields 5, then `x`).
	///A word without a numeric prefix is consumed whole and reported as `InvalidNumber`.
	pub fn number(&mut self) -> Result<f64, CalcError> {
		let word = self.token()?.ok_or(CalcError::EndOfInput)?;
		let end = match NUM_PREFIX.find(&word) {
			Some(m) => m.end(),
			None => {return Err(CalcError::InvalidNumber(word));}
		};
		let (lit, rest) = word.split_at(end);
		for c in rest.chars().rev() {
			self.buf.push_front(c);	//leftovers are read next
		}
		lit.parse::<f64>().map_err(|_| CalcError::InvalidNumber(word.clone()))
	}
}
