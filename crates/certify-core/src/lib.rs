//! Certificate issuing core.
//!
//! - `id` - `CERT-<year>-<suffix>` identifiers
//! - `record` - form input, pending and stored records
//! - `store` - storage seam and the in-memory backend
//! - `issue` - validate, assign an identifier, persist
//! - `resolve` - identifier to verification verdict
//! - `export` - rasterizer seam and PDF assembly
//! - `catalog` - fixed certificate type / domain choices

pub mod catalog;
pub mod error;
pub mod export;
pub mod id;
pub mod issue;
pub mod record;
pub mod resolve;
pub mod store;

pub use error::{Error, Result, StoreError};
pub use export::{
    ExportedFile, FrameRasterizer, PageGeometry, PdfExporter, RasterImage, Rasterizer,
};
pub use id::{CertificateId, IdGenerator, SuffixSource, ThreadRngSource};
pub use issue::Issuer;
pub use record::{
    CertificateRecord, NewCertificate, PendingCertificate, TemplateType, verification_url,
};
pub use resolve::{Resolution, Resolver};
pub use store::{CertificateStore, MemoryCertificateStore};
