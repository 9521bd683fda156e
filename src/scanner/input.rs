use std::io::{self, BufRead};


/// A source of successive characters.
pub trait Input {
	/// Read the next character, or `None` at the end of the stream.
	fn read_char(&mut self) -> io::Result<Option<char>>;
}


impl<T> Input for &mut T
where
	T: Input + ?Sized,
{
	fn read_char(&mut self) -> io::Result<Option<char>> {
		(**self).read_char()
	}
}


impl Input for Box<dyn Input + Send> {
	fn read_char(&mut self) -> io::Result<Option<char>> {
		(**self).read_char()
	}
}


/// Input over an in-memory string.
#[derive(Debug, Clone)]
pub struct Text {
	chars: std::vec::IntoIter<char>,
}


impl Text {
	pub fn new(text: &str) -> Self {
		Self { chars: text.chars().collect::<Vec<_>>().into_iter() }
	}
}


impl From<&str> for Text {
	fn from(text: &str) -> Self {
		Self::new(text)
	}
}


impl Input for Text {
	fn read_char(&mut self) -> io::Result<Option<char>> {
		Ok(self.chars.next())
	}
}


/// UTF-8 decoding input over a buffered reader.
#[derive(Debug)]
pub struct Reader<R> {
	inner: R,
	/// Bytes of a character split across two buffer fills.
	pending: Vec<u8>,
}


impl<R> Reader<R>
where
	R: BufRead,
{
	pub fn new(inner: R) -> Self {
		Self { inner, pending: Vec::with_capacity(4) }
	}


	fn invalid_utf8() -> io::Error {
		io::Error::new(io::ErrorKind::InvalidData, "stream did not contain valid UTF-8")
	}
}


impl<R> Input for Reader<R>
where
	R: BufRead,
{
	fn read_char(&mut self) -> io::Result<Option<char>> {
		loop {
			let available = self.inner.fill_buf()?;

			if available.is_empty() {
				return if self.pending.is_empty() {
					Ok(None)
				} else {
					Err(Self::invalid_utf8())
				};
			}

			if !self.pending.is_empty() {
				let byte = available[0];
				self.inner.consume(1);
				self.pending.push(byte);

				let (decoded, size) = bstr::decode_utf8(&self.pending);
				match decoded {
					Some(c) => {
						self.pending.clear();
						return Ok(Some(c));
					}
					// Still a valid prefix, keep reading.
					None if size == self.pending.len() && size < 4 => continue,
					None => return Err(Self::invalid_utf8()),
				}
			}

			let (decoded, size) = bstr::decode_utf8(available);
			match decoded {
				Some(c) => {
					self.inner.consume(size);
					return Ok(Some(c));
				}

				None if size == available.len() && size < 4 => {
					self.pending.extend_from_slice(available);
					self.inner.consume(size);
				}

				None => return Err(Self::invalid_utf8()),
			}
		}
	}
}
