use std::collections::VecDeque;


/// A bounded lookahead stack. Level 0 is the bottom, the current frame. Deeper levels
/// are materialized on demand and dropped from the top. The capacity is only a limit,
/// storage grows with the levels actually in use.
#[derive(Debug)]
pub struct Stack<T> {
	items: VecDeque<T>,
	capacity: usize,
}


impl<T> Stack<T> {
	pub fn new(capacity: usize) -> Self {
		Self {
			items: VecDeque::new(),
			capacity,
		}
	}


	pub fn len(&self) -> usize {
		self.items.len()
	}


	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}


	pub fn capacity(&self) -> usize {
		self.capacity
	}


	/// Push on top. Returns the item back if the stack is full.
	pub fn push(&mut self, item: T) -> Result<(), T> {
		if self.items.len() >= self.capacity {
			return Err(item);
		}

		self.items.push_back(item);
		Ok(())
	}


	/// Drop the top item.
	pub fn pop(&mut self) -> Option<T> {
		self.items.pop_back()
	}


	/// Drop the bottom item, shifting every level down by one.
	pub fn shift(&mut self) -> Option<T> {
		self.items.pop_front()
	}


	pub fn get(&self, level: usize) -> Option<&T> {
		self.items.get(level)
	}


	pub fn top(&self) -> Option<&T> {
		self.items.back()
	}


	pub fn bottom(&self) -> Option<&T> {
		self.items.front()
	}


	pub fn clear(&mut self) {
		self.items.clear();
	}
}
