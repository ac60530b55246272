//! Certificate export
//!
//! A [`Rasterizer`] turns a record into a fixed-size RGB image; the
//! [`PdfExporter`] wraps that image into a single-page PDF. The result is an
//! image-based document, not an editable one.
//!
//! The built-in [`FrameRasterizer`] paints the template frame and the QR code
//! of the verification URL; certificate text is left to richer rasterizers.

use std::sync::Arc;

use lopdf::{
    Document, Object, Stream,
    content::{Content, Operation},
    dictionary,
};
use qrcode::{Color, QrCode};

use crate::{
    error::{Error, Result},
    record::{CertificateRecord, TemplateType},
};

pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Page size in page units plus the raster scale factor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageGeometry {
    pub width: u32,
    pub height: u32,
    pub scale: u32,
}

impl PageGeometry {
    /// A4 landscape at 96 dpi, rasterized at 2x
    pub const fn a4_landscape() -> Self {
        Self {
            width: 1123,
            height: 794,
            scale: 2,
        }
    }

    pub fn pixel_width(&self) -> u32 {
        self.width * self.scale
    }

    pub fn pixel_height(&self) -> u32 {
        self.height * self.scale
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::a4_landscape()
    }
}

/// Packed 8-bit RGB pixels, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    rgb: Vec<u8>,
}

impl RasterImage {
    pub fn new(width: u32, height: u32, rgb: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * 3;
        if rgb.len() != expected {
            return Err(Error::Export(format!(
                "raster buffer is {} bytes, expected {expected} for {width}x{height}",
                rgb.len()
            )));
        }
        Ok(Self { width, height, rgb })
    }

    pub fn filled(width: u32, height: u32, color: [u8; 3]) -> Self {
        let rgb = color
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 3)
            .collect();
        Self { width, height, rgb }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 3;
        Some([self.rgb[i], self.rgb[i + 1], self.rgb[i + 2]])
    }

    /// Fill the rectangle, clipped to the image bounds
    pub fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, color: [u8; 3]) {
        let x_end = x.saturating_add(w).min(self.width);
        let y_end = y.saturating_add(h).min(self.height);
        for row in y .. y_end {
            let start = (row as usize * self.width as usize + x as usize) * 3;
            let end = (row as usize * self.width as usize + x_end as usize) * 3;
            if start >= end {
                continue;
            }
            for px in self.rgb[start .. end].chunks_exact_mut(3) {
                px.copy_from_slice(&color);
            }
        }
    }

    /// Axis-aligned frame of the given thickness, inset from the image edge
    pub fn stroke_frame(&mut self, inset: u32, thickness: u32, color: [u8; 3]) {
        let w = self.width.saturating_sub(2 * inset);
        let h = self.height.saturating_sub(2 * inset);
        self.fill_rect(inset, inset, w, thickness, color);
        self.fill_rect(inset, (inset + h).saturating_sub(thickness), w, thickness, color);
        self.fill_rect(inset, inset, thickness, h, color);
        self.fill_rect((inset + w).saturating_sub(thickness), inset, thickness, h, color);
    }

    pub fn into_rgb(self) -> Vec<u8> {
        self.rgb
    }
}

/// Turns a record into pixels
pub trait Rasterizer: Send + Sync {
    /// Must return an image of exactly `geometry.pixel_width()` by
    /// `geometry.pixel_height()` pixels.
    fn rasterize(&self, record: &CertificateRecord, geometry: PageGeometry) -> Result<RasterImage>;
}

const WHITE: [u8; 3] = [0xff, 0xff, 0xff];
const INK: [u8; 3] = [0x11, 0x18, 0x27];

/// Modules of white border required around a QR symbol
const QR_QUIET_ZONE: u32 = 4;

fn accent(template: TemplateType) -> [u8; 3] {
    match template {
        TemplateType::Classic => [0x25, 0x63, 0xeb],
        TemplateType::Professional => [0xea, 0x58, 0x0c],
        TemplateType::Modern => [0x0f, 0x76, 0x6e],
    }
}

impl RasterImage {
    /// Paint `data` as a QR symbol of at most `max_side` pixels, quiet zone
    /// included, with its top-left corner at `(x, y)`. Returns the side painted.
    pub fn paint_qr(&mut self, data: &str, x: u32, y: u32, max_side: u32) -> Result<u32> {
        let code = QrCode::new(data.as_bytes())?;
        let modules = code.width() as u32;
        let span = modules + 2 * QR_QUIET_ZONE;
        let module = (max_side / span).max(1);
        let side = span * module;

        self.fill_rect(x, y, side, side, WHITE);
        for (i, color) in code.to_colors().into_iter().enumerate() {
            if color != Color::Dark {
                continue;
            }
            let (col, row) = (i as u32 % modules, i as u32 / modules);
            self.fill_rect(
                x + (QR_QUIET_ZONE + col) * module,
                y + (QR_QUIET_ZONE + row) * module,
                module,
                module,
                INK,
            );
        }
        Ok(side)
    }
}

/// Paints the template frame (white sheet, accent border and rule) and the
/// verification QR code in the lower right corner.
#[derive(Debug, Default, Clone, Copy)]
pub struct FrameRasterizer;

impl FrameRasterizer {
    /// Side of the QR box in page units
    const QR_SIZE: u32 = 120;
    /// Distance of the QR box from the page edge in page units
    const QR_MARGIN: u32 = 48;
}

impl Rasterizer for FrameRasterizer {
    fn rasterize(&self, record: &CertificateRecord, geometry: PageGeometry) -> Result<RasterImage> {
        let (w, h) = (geometry.pixel_width(), geometry.pixel_height());
        let color = accent(record.template_type);
        let unit = geometry.scale.max(1);

        let mut image = RasterImage::filled(w, h, WHITE);
        image.stroke_frame(0, 16 * unit, color);
        image.stroke_frame(28 * unit, 2 * unit, color);

        // Title rule under the heading area
        let rule_w = 128 * unit;
        image.fill_rect(w.saturating_sub(rule_w) / 2, h / 4, rule_w, 4 * unit, color);

        let max_side = Self::QR_SIZE * unit;
        let margin = Self::QR_MARGIN * unit;
        image.paint_qr(
            &record.qr_code_data,
            w.saturating_sub(margin + max_side),
            h.saturating_sub(margin + max_side),
            max_side,
        )?;
        Ok(image)
    }
}

/// Exported file ready to be served or written to disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

pub fn pdf_file_name(certificate_id: &str) -> String {
    format!("certificate-{certificate_id}.pdf")
}

#[derive(Clone)]
pub struct PdfExporter {
    rasterizer: Arc<dyn Rasterizer>,
    geometry: PageGeometry,
}

impl PdfExporter {
    pub fn new(rasterizer: Arc<dyn Rasterizer>) -> Self {
        Self {
            rasterizer,
            geometry: PageGeometry::default(),
        }
    }

    pub fn with_geometry(mut self, geometry: PageGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    pub fn geometry(&self) -> PageGeometry {
        self.geometry
    }

    pub fn export(&self, record: &CertificateRecord) -> Result<ExportedFile> {
        let image = self.rasterizer.rasterize(record, self.geometry)?;
        let (w, h) = (self.geometry.pixel_width(), self.geometry.pixel_height());
        if image.width() != w || image.height() != h {
            return Err(Error::Export(format!(
                "rasterizer produced {}x{}, expected {w}x{h}",
                image.width(),
                image.height()
            )));
        }

        let bytes = assemble_pdf(image, self.geometry, record.certificate_id.as_str())?;
        tracing::debug!(
            certificate_id = %record.certificate_id,
            size = bytes.len(),
            "certificate exported"
        );

        Ok(ExportedFile {
            file_name: pdf_file_name(record.certificate_id.as_str()),
            content_type: PDF_CONTENT_TYPE,
            bytes,
        })
    }
}

fn int(v: u32) -> Object {
    Object::Integer(i64::from(v))
}

fn assemble_pdf(image: RasterImage, geometry: PageGeometry, certificate_id: &str) -> Result<Vec<u8>> {
    let (page_w, page_h) = (int(geometry.width), int(geometry.height));

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let image_id = doc.add_object(Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => int(image.width()),
            "Height" => int(image.height()),
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => int(8),
        },
        image.into_rgb(),
    ));

    // Scale the unit image square to cover the whole page
    let content = Content {
        operations: vec![
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![page_w.clone(), int(0), int(0), page_h.clone(), int(0), int(0)],
            ),
            Operation::new("Do", vec![Object::Name(b"Im0".to_vec())]),
            Operation::new("Q", vec![]),
        ],
    };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => dictionary! {
            "XObject" => dictionary! {
                "Im0" => image_id,
            },
        },
        "MediaBox" => vec![int(0), int(0), page_w, page_h],
    });

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![Object::Reference(page_id)],
            "Count" => int(1),
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal(format!("Certificate {certificate_id}")),
        "Producer" => Object::string_literal("certify"),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| Error::Export(format!("failed to write pdf: {e}")))?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        id::CertificateId,
        record::{PendingCertificate, tests::sample_form},
    };

    const SMALL: PageGeometry = PageGeometry {
        width: 120,
        height: 80,
        scale: 1,
    };

    fn record(template: TemplateType) -> CertificateRecord {
        let mut pending = PendingCertificate::new(
            CertificateId::new(2025, 42),
            sample_form(),
            "http://localhost:8080",
        );
        pending.template_type = template;
        CertificateRecord::from_pending(pending, 1_741_089_600)
    }

    struct WrongSize;

    impl Rasterizer for WrongSize {
        fn rasterize(&self, _: &CertificateRecord, _: PageGeometry) -> Result<RasterImage> {
            Ok(RasterImage::filled(10, 10, WHITE))
        }
    }

    struct Broken;

    impl Rasterizer for Broken {
        fn rasterize(&self, _: &CertificateRecord, _: PageGeometry) -> Result<RasterImage> {
            Err(Error::Export("font missing".to_string()))
        }
    }

    #[test]
    fn test_frame_rasterizer_fills_page() {
        let geometry = PageGeometry::a4_landscape();
        let image = FrameRasterizer
            .rasterize(&record(TemplateType::Classic), geometry)
            .unwrap();

        assert_eq!(image.width(), 2246);
        assert_eq!(image.height(), 1588);
        assert_eq!(image.pixel(0, 0), Some(accent(TemplateType::Classic)));
        assert_eq!(image.pixel(1123, 794), Some(WHITE));
        assert_eq!(image.pixel(2246, 0), None);
    }

    #[test]
    fn test_frame_color_follows_template() {
        let classic = FrameRasterizer
            .rasterize(&record(TemplateType::Classic), SMALL)
            .unwrap();
        let modern = FrameRasterizer
            .rasterize(&record(TemplateType::Modern), SMALL)
            .unwrap();
        // Bottom right corner: clear of the QR symbol on the small page
        assert_ne!(classic.pixel(119, 79), modern.pixel(119, 79));
    }

    fn record_with_id(suffix: u16) -> CertificateRecord {
        let pending = PendingCertificate::new(
            CertificateId::new(2025, suffix),
            sample_form(),
            "https://certs.example.org",
        );
        CertificateRecord::from_pending(pending, 1_741_089_600)
    }

    #[test]
    fn test_qr_code_is_painted_in_the_corner() {
        let geometry = PageGeometry::a4_landscape();
        let image = FrameRasterizer.rasterize(&record_with_id(42), geometry).unwrap();

        // QR box spans the 240px square ending 96px from the bottom right corner
        let (x0, y0) = (2246 - 96 - 240, 1588 - 96 - 240);
        let dark = (x0 .. x0 + 240)
            .flat_map(|x| (y0 .. y0 + 240).map(move |y| (x, y)))
            .filter(|&(x, y)| image.pixel(x, y) == Some(INK))
            .count();
        assert!(dark > 0);

        // Outside the QR box no ink is used
        assert!((0 .. x0).all(|x| image.pixel(x, y0 + 120) != Some(INK)));
    }

    #[test]
    fn test_raster_depends_on_certificate() {
        let geometry = PageGeometry::a4_landscape();
        let first = FrameRasterizer.rasterize(&record_with_id(42), geometry).unwrap();
        let second = FrameRasterizer.rasterize(&record_with_id(43), geometry).unwrap();
        let again = FrameRasterizer.rasterize(&record_with_id(42), geometry).unwrap();

        assert_ne!(first, second);
        assert_eq!(first, again);
    }

    #[test]
    fn test_qr_symbol_keeps_quiet_zone() {
        let data = "https://certs.example.org/verify/CERT-2025-0042";
        let modules = QrCode::new(data.as_bytes()).unwrap().width() as u32;
        let mut image = RasterImage::filled(200, 200, accent(TemplateType::Modern));

        let side = image.paint_qr(data, 10, 10, 150).unwrap();
        let module = side / (modules + 2 * QR_QUIET_ZONE);
        assert!(side <= 150);
        assert!(module >= 1);

        // White quiet zone around a dark finder pattern corner
        let corner = 10 + QR_QUIET_ZONE * module;
        assert_eq!(image.pixel(10, 10), Some(WHITE));
        assert_eq!(image.pixel(corner, corner), Some(INK));
        assert_eq!(image.pixel(10 + side - 1, 10 + side - 1), Some(WHITE));
        assert_eq!(image.pixel(10 + side, 10), Some(accent(TemplateType::Modern)));
    }

    #[test]
    fn test_raster_buffer_length_is_checked() {
        assert!(RasterImage::new(2, 2, vec![0; 12]).is_ok());
        assert!(RasterImage::new(2, 2, vec![0; 11]).is_err());
    }

    #[test]
    fn test_export_produces_single_page_pdf() {
        let exporter = PdfExporter::new(Arc::new(FrameRasterizer)).with_geometry(SMALL);
        let file = exporter.export(&record(TemplateType::Professional)).unwrap();

        assert_eq!(file.file_name, "certificate-CERT-2025-0042.pdf");
        assert_eq!(file.content_type, "application/pdf");
        assert!(file.bytes.starts_with(b"%PDF-1.5"));

        let doc = Document::load_mem(&file.bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn test_export_rejects_wrong_raster_size() {
        let exporter = PdfExporter::new(Arc::new(WrongSize)).with_geometry(SMALL);
        let err = exporter.export(&record(TemplateType::Classic)).unwrap_err();
        assert!(matches!(err, Error::Export(_)));
    }

    #[test]
    fn test_rasterizer_failure_surfaces_as_export_error() {
        let exporter = PdfExporter::new(Arc::new(Broken)).with_geometry(SMALL);
        let err = exporter.export(&record(TemplateType::Classic)).unwrap_err();
        assert!(err.to_string().contains("font missing"));
    }
}
