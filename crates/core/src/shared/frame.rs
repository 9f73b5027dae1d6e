/// Raw pixel data for one camera frame: contiguous RGB bytes in row-major order.
///
/// Carries the index of the frame it came from so detector backends can
/// correlate buffers with recorded results.
#[derive(Clone, Debug)]
pub struct PixelBuffer {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
    frame_index: usize,
}

impl PixelBuffer {
    pub fn new(data: Vec<u8>, width: u32, height: u32, channels: u8, frame_index: usize) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * (channels as usize),
            "data length must equal width * height * channels"
        );
        Self {
            data,
            width,
            height,
            channels,
            frame_index,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn frame_index(&self) -> usize {
        self.frame_index
    }
}

/// One camera tick as delivered by a [`FrameSource`](crate::source::domain::frame_source::FrameSource).
///
/// A frame may arrive without a readable pixel buffer (e.g. a failed decode);
/// the dispatcher drops those silently.
#[derive(Clone, Debug)]
pub struct Frame {
    buffer: Option<PixelBuffer>,
    index: usize,
}

impl Frame {
    pub fn new(buffer: PixelBuffer) -> Self {
        let index = buffer.frame_index();
        Self {
            buffer: Some(buffer),
            index,
        }
    }

    /// A frame whose pixel data could not be read.
    pub fn unreadable(index: usize) -> Self {
        Self {
            buffer: None,
            index,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn pixel_buffer(&self) -> Option<&PixelBuffer> {
        self.buffer.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_accessors() {
        let data = vec![0u8; 12]; // 2x2x3
        let buffer = PixelBuffer::new(data.clone(), 2, 2, 3, 5);
        assert_eq!(buffer.width(), 2);
        assert_eq!(buffer.height(), 2);
        assert_eq!(buffer.channels(), 3);
        assert_eq!(buffer.frame_index(), 5);
        assert_eq!(buffer.data(), &data[..]);
    }

    #[test]
    fn test_frame_takes_index_from_buffer() {
        let frame = Frame::new(PixelBuffer::new(vec![0u8; 3], 1, 1, 3, 7));
        assert_eq!(frame.index(), 7);
        assert!(frame.pixel_buffer().is_some());
    }

    #[test]
    fn test_unreadable_frame_has_no_buffer() {
        let frame = Frame::unreadable(3);
        assert_eq!(frame.index(), 3);
        assert!(frame.pixel_buffer().is_none());
    }

    #[test]
    #[should_panic(expected = "data length must equal width * height * channels")]
    fn test_mismatched_data_length_panics_in_debug() {
        PixelBuffer::new(vec![0u8; 10], 2, 2, 3, 0);
    }
}
