use bitflags::bitflags;

bitflags! {
	#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
	pub struct BufferUsage: u32 {
		const VERTEX = 1 << 0;
		/// read by the meshlet stage as a storage buffer
		const STORAGE = 1 << 1;
		const COPY_DST = 1 << 2;
	}
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct BufferDescriptor<'a> {
	pub label: &'a str,
	pub size: u64,
	pub usage: BufferUsage,
}

impl<'a> BufferDescriptor<'a> {
	pub fn new(label: &'a str, size: u64, usage: BufferUsage) -> Self {
		Self { label, size, usage }
	}
}
