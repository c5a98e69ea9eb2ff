use serde::{Deserialize, Serialize};
use zbus::zvariant::{StructureBuilder, Type, Value};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageError {
    #[error("image dimensions {width}x{height} are negative")]
    NegativeSize { width: i32, height: i32 },
    #[error("a {width}x{height} image needs {expected} bytes of RGBA data, got {actual}")]
    SizeMismatch { width: i32, height: i32, expected: usize, actual: usize },
}

/// An image in straight (non-premultiplied) RGBA8, row by row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: i32,
    height: i32,
    rgba: Vec<u8>,
}

impl Image {
    pub fn from_rgba(width: i32, height: i32, rgba: Vec<u8>) -> Result<Self, ImageError> {
        if width < 0 || height < 0 {
            return Err(ImageError::NegativeSize { width, height });
        }

        let expected = (width as usize).checked_mul(height as usize).and_then(|n| n.checked_mul(4));
        if expected != Some(rgba.len()) {
            return Err(ImageError::SizeMismatch {
                width,
                height,
                expected: expected.unwrap_or(usize::MAX),
                actual: rgba.len(),
            });
        }

        Ok(Self { width, height, rgba })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }
}

/// One entry of an icon pixmap property, in StatusNotifierItem's [Icon format]: ARGB32 in network
/// byte order. D-Bus signature `(iiay)`.
///
/// [Icon format]: https://freedesktop.org/wiki/Specifications/StatusNotifierItem/Icons/
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Type)]
pub struct IconPixmap {
    pub width: i32,
    pub height: i32,
    pub bytes: Vec<u8>,
}

impl From<&Image> for IconPixmap {
    fn from(image: &Image) -> Self {
        // Hosts expect ARGB32, so move alpha from the last byte of each pixel to the first.
        let mut bytes = image.rgba.clone();
        for chunk in bytes.chunks_exact_mut(4) {
            chunk.rotate_right(1);
        }

        IconPixmap { width: image.width, height: image.height, bytes }
    }
}

impl<'a> From<IconPixmap> for Value<'a> {
    fn from(value: IconPixmap) -> Self {
        Value::Structure(
            StructureBuilder::new().add_field(value.width).add_field(value.height).add_field(value.bytes).build(),
        )
    }
}

/// Value of the `ToolTip` property. D-Bus signature `(sa(iiay)ss)`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Type)]
pub struct ToolTip {
    pub icon_name: String,
    pub icon_pixmap: Vec<IconPixmap>,
    pub title: String,
    pub description: String,
}

impl<'a> From<ToolTip> for Value<'a> {
    fn from(value: ToolTip) -> Self {
        Value::Structure(
            StructureBuilder::new()
                .add_field(value.icon_name)
                .add_field(value.icon_pixmap)
                .add_field(value.title)
                .add_field(value.description)
                .build(),
        )
    }
}
