//! Embedded-image requantization.
//!
//! Decodes each image XObject, optionally shrinks it, re-encodes it as
//! JPEG, and rewrites the stream in place when that saves space. Images
//! with soft masks or exotic filters are left untouched.

use std::collections::HashSet;
use std::io::Read;

use flate2::read::ZlibDecoder;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, GrayImage, RgbImage};
use lopdf::{Document, Object, ObjectId, Stream};

use crate::codec::{ImageCodec, PixelMap};
use crate::error::StrategyError;

#[derive(Debug, Default, Clone, Copy)]
pub struct RewriteStats {
    pub examined: usize,
    pub rewritten: usize,
}

/// Re-encode every rewritable image in the document at the given quality
/// and linear scale.
pub fn downsample_images(
    doc: &mut Document,
    images: &dyn ImageCodec,
    quality: f32,
    scale: f32,
) -> Result<RewriteStats, StrategyError> {
    let mut stats = RewriteStats::default();

    let mut masks: HashSet<ObjectId> = HashSet::new();
    let mut candidates: Vec<ObjectId> = Vec::new();
    for (id, object) in doc.objects.iter() {
        if let Object::Stream(stream) = object {
            if !is_image(stream) {
                continue;
            }
            if let Ok(Object::Reference(mask_id)) = stream.dict.get(b"SMask") {
                masks.insert(*mask_id);
            }
            candidates.push(*id);
        }
    }

    for id in candidates {
        // Alpha channels and their owners stay as they are.
        if masks.contains(&id) {
            continue;
        }
        let stream = match doc.get_object(id) {
            Ok(Object::Stream(stream)) => stream.clone(),
            _ => continue,
        };
        if stream.dict.get(b"SMask").is_ok() {
            continue;
        }

        stats.examined += 1;

        let Some(decoded) = decode_image(doc, &stream) else {
            continue;
        };
        let resized = shrink(decoded, scale);
        let rgb = resized.to_rgb8();
        let (width, height) = rgb.dimensions();
        let pixels = PixelMap::new(width, height, rgb.into_raw());

        let jpeg = images.encode_jpeg(&pixels, quality)?;
        if jpeg.len() >= stream.content.len() {
            continue;
        }

        if let Ok(Object::Stream(target)) = doc.get_object_mut(id) {
            target.dict.set("Length", Object::Integer(jpeg.len() as i64));
            target.dict.set("Filter", Object::Name(b"DCTDecode".to_vec()));
            target.dict.set("Width", Object::Integer(width as i64));
            target.dict.set("Height", Object::Integer(height as i64));
            target
                .dict
                .set("ColorSpace", Object::Name(b"DeviceRGB".to_vec()));
            target.dict.set("BitsPerComponent", Object::Integer(8));
            target.dict.remove(b"DecodeParms");
            target.dict.remove(b"Decode");
            target.content = jpeg;
            stats.rewritten += 1;
        }
    }

    Ok(stats)
}

fn is_image(stream: &Stream) -> bool {
    matches!(stream.dict.get(b"Subtype"), Ok(Object::Name(name)) if name == b"Image")
}

fn filters(stream: &Stream) -> Vec<Vec<u8>> {
    match stream.dict.get(b"Filter") {
        Ok(Object::Name(name)) => vec![name.clone()],
        Ok(Object::Array(items)) => items
            .iter()
            .filter_map(|object| match object {
                Object::Name(name) => Some(name.clone()),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn dimension(stream: &Stream, key: &[u8]) -> Option<u32> {
    stream
        .dict
        .get(key)
        .ok()
        .and_then(|object| object.as_i64().ok())
        .filter(|value| *value > 0)
        .map(|value| value as u32)
}

fn decode_image(doc: &Document, stream: &Stream) -> Option<DynamicImage> {
    let width = dimension(stream, b"Width")?;
    let height = dimension(stream, b"Height")?;

    let filters = filters(stream);
    if filters
        .iter()
        .any(|name| name == b"DCTDecode" || name == b"JPXDecode")
    {
        let data = stream
            .decompressed_content()
            .unwrap_or_else(|_| stream.content.clone());
        return image::load_from_memory(&data).ok();
    }
    if !filters.is_empty() && !filters.iter().all(|name| name == b"FlateDecode") {
        // CCITT, JBIG2 and friends are not worth hand-decoding.
        return None;
    }

    let bits = stream
        .dict
        .get(b"BitsPerComponent")
        .ok()
        .and_then(|object| object.as_i64().ok())
        .unwrap_or(8);
    if bits != 8 {
        return None;
    }

    let data = decompress(stream)?;
    raw_to_image(doc, stream, width, height, data)
}

fn decompress(stream: &Stream) -> Option<Vec<u8>> {
    if filters(stream).is_empty() {
        return Some(stream.content.clone());
    }
    if let Ok(content) = stream.decompressed_content() {
        return Some(content);
    }
    // Manual zlib pass for streams lopdf refuses to decode.
    let mut decoder = ZlibDecoder::new(&stream.content[..]);
    let mut buffer = Vec::new();
    decoder.read_to_end(&mut buffer).ok()?;
    Some(buffer)
}

fn color_space_name(doc: &Document, object: &Object) -> Vec<u8> {
    match object {
        Object::Name(name) => name.clone(),
        Object::Array(items) => items
            .first()
            .map(|first| color_space_name(doc, first))
            .unwrap_or_default(),
        Object::Reference(id) => doc
            .get_object(*id)
            .map(|resolved| color_space_name(doc, resolved))
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

fn raw_to_image(
    doc: &Document,
    stream: &Stream,
    width: u32,
    height: u32,
    data: Vec<u8>,
) -> Option<DynamicImage> {
    let pixels = (width as usize) * (height as usize);
    let space = stream
        .dict
        .get(b"ColorSpace")
        .map(|object| color_space_name(doc, object))
        .unwrap_or_default();

    match space.as_slice() {
        b"DeviceGray" => {
            let gray = GrayImage::from_raw(width, height, data.get(..pixels)?.to_vec())?;
            Some(DynamicImage::ImageLuma8(gray))
        }
        b"DeviceRGB" => {
            let rgb = RgbImage::from_raw(width, height, data.get(..pixels * 3)?.to_vec())?;
            Some(DynamicImage::ImageRgb8(rgb))
        }
        b"DeviceCMYK" => {
            let cmyk = data.get(..pixels * 4)?;
            let mut rgb_data = Vec::with_capacity(pixels * 3);
            for chunk in cmyk.chunks(4) {
                let c = chunk[0] as f32 / 255.0;
                let m = chunk[1] as f32 / 255.0;
                let y = chunk[2] as f32 / 255.0;
                let k = chunk[3] as f32 / 255.0;
                rgb_data.push(((1.0 - c) * (1.0 - k) * 255.0) as u8);
                rgb_data.push(((1.0 - m) * (1.0 - k) * 255.0) as u8);
                rgb_data.push(((1.0 - y) * (1.0 - k) * 255.0) as u8);
            }
            let rgb = RgbImage::from_raw(width, height, rgb_data)?;
            Some(DynamicImage::ImageRgb8(rgb))
        }
        _ => {
            // ICCBased and other indirect spaces: guess from the byte count.
            if data.len() >= pixels * 3 {
                let rgb = RgbImage::from_raw(width, height, data[..pixels * 3].to_vec())?;
                Some(DynamicImage::ImageRgb8(rgb))
            } else if data.len() >= pixels {
                let gray = GrayImage::from_raw(width, height, data[..pixels].to_vec())?;
                Some(DynamicImage::ImageLuma8(gray))
            } else {
                None
            }
        }
    }
}

fn shrink(img: DynamicImage, scale: f32) -> DynamicImage {
    if scale >= 1.0 {
        return img;
    }
    let width = ((img.width() as f32 * scale).round() as u32).max(1);
    let height = ((img.height() as f32 * scale).round() as u32).max(1);
    if width >= img.width() || height >= img.height() {
        return img;
    }
    img.resize_exact(width, height, FilterType::Lanczos3)
}
