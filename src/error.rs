///everything a single command can fail with
///
///All variants except `Io` are session-local: the loop logs them and prompts for the next command.
#[derive(Debug, thiserror::Error)]
pub enum CalcError {
	#[error("Empty command")]
	EmptyCommand,

	#[error("Invalid register input")]
	InvalidRegister,

	#[error("Division by zero is not allowed")]
	DivisionByZero,

	#[error("{0} is an unknown command")]
	UnknownCommand(char),

	#[error("\"{0}\" is not a number")]
	InvalidNumber(String),

	#[error("Input ended before the command was complete")]
	EndOfInput,

	#[error(transparent)]
	Io(#[from] std::io::Error),
}

impl CalcError {
	///whether the session can keep going after this error
	pub fn is_recoverable(&self) -> bool {
		!matches!(self, Self::Io(_)|Self::EndOfInput)
	}
}
