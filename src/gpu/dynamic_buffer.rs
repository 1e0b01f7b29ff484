//! Growable vertex buffer for per-instance data.
//!
//! Grows 2x when the data outgrows capacity and never shrinks (GPU buffers
//! cannot be resized in place).

use std::marker::PhantomData;

/// Smallest allocation, in bytes.
const MIN_CAPACITY: usize = 256;

/// Typed, growable GPU buffer that tracks an item count.
pub struct DynamicBuffer<T> {
    buffer: wgpu::Buffer,
    capacity: usize,
    count: usize,
    usage: wgpu::BufferUsages,
    label: String,
    _marker: PhantomData<T>,
}

impl<T: bytemuck::Pod> DynamicBuffer<T> {
    /// Buffer with room for `items` elements.
    #[must_use]
    pub fn with_capacity(
        device: &wgpu::Device,
        label: &str,
        items: usize,
        usage: wgpu::BufferUsages,
    ) -> Self {
        let capacity = byte_len::<T>(items).max(MIN_CAPACITY);
        Self {
            buffer: allocate(device, label, capacity, usage),
            capacity,
            count: 0,
            usage,
            label: label.to_owned(),
            _marker: PhantomData,
        }
    }

    /// Replace the contents, growing if necessary.
    ///
    /// Returns `true` if the buffer was reallocated.
    pub fn write(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        items: &[T],
    ) -> bool {
        let bytes: &[u8] = bytemuck::cast_slice(items);
        let reallocated = bytes.len() > self.capacity;
        if reallocated {
            self.capacity = grown_capacity(self.capacity, bytes.len());
            self.buffer = allocate(device, &self.label, self.capacity, self.usage);
            log::debug!("{} grew to {} bytes", self.label, self.capacity);
        }
        if !bytes.is_empty() {
            queue.write_buffer(&self.buffer, 0, bytes);
        }
        self.count = items.len();
        reallocated
    }

    /// The underlying buffer.
    #[must_use]
    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    /// Items written by the last [`Self::write`].
    #[must_use]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Whether the last write was empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

fn byte_len<T>(items: usize) -> usize {
    size_of::<T>().saturating_mul(items)
}

/// 2x growth, at least 1 KiB more than before.
fn grown_capacity(current: usize, needed: usize) -> usize {
    needed.saturating_mul(2).max(current + 1024)
}

fn allocate(
    device: &wgpu::Device,
    label: &str,
    capacity: usize,
    usage: wgpu::BufferUsages,
) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: capacity as u64,
        usage: usage | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn growth_doubles_needed_size() {
        assert_eq!(grown_capacity(256, 4000), 8000);
    }

    #[test]
    fn growth_adds_at_least_a_kibibyte() {
        assert_eq!(grown_capacity(4096, 4100), 8200);
        assert_eq!(grown_capacity(8192, 8200), 16400);
        assert_eq!(grown_capacity(2048, 2050), 4100);
        assert_eq!(grown_capacity(4000, 2100), 5024);
    }

    #[test]
    fn byte_len_uses_item_size() {
        assert_eq!(byte_len::<[f32; 4]>(3), 48);
    }
}
