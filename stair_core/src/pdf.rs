//! # PDF Generation Module
//!
//! Renders the bill of materials as a one-page PDF using Typst.
//!
//! ## Architecture
//!
//! - The Typst template is embedded as a string constant
//! - Data is injected by `{{PLACEHOLDER}}` replacement before compilation
//! - Fonts come from `typst-assets` and are parsed once per process
//! - Output is raw PDF bytes (`Vec<u8>`)
//!
//! ## Example
//!
//! ```rust,no_run
//! use stair_core::geometry::build;
//! use stair_core::pdf::render_bom_pdf;
//! use stair_core::policy::GeometryPolicy;
//! use stair_core::service::interpret_response;
//!
//! # let body = "{}";
//! let response = interpret_response(200, body).unwrap();
//! let model = build(&response.dimensions, &GeometryPolicy::eco()).unwrap();
//! let pdf = render_bom_pdf(&response, &model.summary()).unwrap();
//! std::fs::write("stair_bom.pdf", pdf).unwrap();
//! ```

use chrono::{Datelike, Utc};
use once_cell::sync::Lazy;
use tracing::debug;
use typst::diag::{FileError, FileResult};
use typst::foundations::{Bytes, Datetime};
use typst::syntax::{FileId, Source};
use typst::text::{Font, FontBook};
use typst::utils::LazyHash;
use typst::{Library, LibraryExt, World};
use typst_pdf::PdfOptions;

use crate::errors::{StairError, StairResult};
use crate::geometry::ModelSummary;
use crate::service::CalculateResponse;

// ============================================================================
// Typst World Implementation
// ============================================================================

static FONTS: Lazy<Vec<Font>> = Lazy::new(|| {
    let fonts: Vec<Font> = typst_assets::fonts()
        .flat_map(|font_bytes| Font::iter(Bytes::new(font_bytes.to_vec())))
        .collect();
    debug!(count = fonts.len(), "loaded bundled fonts");
    fonts
});

/// A minimal Typst world for compiling documents without external files.
struct PdfWorld {
    /// The main source document
    main: Source,
    /// Font book
    book: LazyHash<FontBook>,
    /// Library (standard functions)
    library: LazyHash<Library>,
}

impl PdfWorld {
    fn new(source: String) -> Self {
        PdfWorld {
            main: Source::detached(source),
            book: LazyHash::new(FontBook::from_fonts(FONTS.iter())),
            library: LazyHash::new(Library::default()),
        }
    }
}

impl World for PdfWorld {
    fn library(&self) -> &LazyHash<Library> {
        &self.library
    }

    fn book(&self) -> &LazyHash<FontBook> {
        &self.book
    }

    fn main(&self) -> FileId {
        self.main.id()
    }

    fn source(&self, id: FileId) -> FileResult<Source> {
        if id == self.main.id() {
            Ok(self.main.clone())
        } else {
            Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
        }
    }

    fn file(&self, id: FileId) -> FileResult<Bytes> {
        Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
    }

    fn font(&self, index: usize) -> Option<Font> {
        FONTS.get(index).cloned()
    }

    fn today(&self, _offset: Option<i64>) -> Option<Datetime> {
        let now = Utc::now();
        Datetime::from_ymd(now.year(), now.month() as u8, now.day() as u8)
    }
}

// ============================================================================
// PDF Template
// ============================================================================

/// Typst template for the staircase bill of materials
const BOM_TEMPLATE: &str = r##"
#set page(
  paper: "a4",
  margin: (top: 2cm, bottom: 2cm, left: 2cm, right: 2cm),
  footer: context [
    #line(length: 100%, stroke: 0.5pt + gray)
    #v(4pt)
    #grid(
      columns: (1fr, 1fr),
      align(left)[#text(size: 9pt)[Staircase bill of materials]],
      align(right)[#text(size: 9pt)[{{DATE}}]],
    )
  ]
)

#set text(font: "DejaVu Sans Mono", size: 10pt)

#align(center)[
  #block(width: 100%, fill: rgb("#f0f0f0"), inset: 12pt, radius: 4pt)[
    #text(size: 16pt, weight: "bold")[Metal Staircase]
    #v(4pt)
    #text(size: 12pt)[{{MATERIAL}} / {{FRAME_COLOR}}]
  ]
]

#v(12pt)

== Parameters

#table(
  columns: (1fr, 1fr),
  stroke: 0.5pt + gray,
  [Width], [{{WIDTH}} mm],
  [Height], [{{HEIGHT}} mm],
  [Steps], [{{STEPS}}],
  [Step height], [{{STEP_HEIGHT}} mm],
  [Step depth], [{{STEP_DEPTH}} mm],
  [Platform], [{{PLATFORM}}],
  [Reinforcement columns], [{{REINFORCEMENTS}}],
)

== Metal Frame

#table(
  columns: (1fr, 1fr),
  stroke: 0.5pt + gray,
  [Total profile length], [{{TOTAL_MM}} mm ({{TOTAL_M}} m)],
  [Paint area], [{{PAINT_AREA}} m²],
  [Paint weight], [{{PAINT_WEIGHT}} g],
)

{{ADDITIONAL}}

== Model Check

#table(
  columns: (1fr, 1fr),
  stroke: 0.5pt + gray,
  [Base beams], [{{BASE_BEAMS}}],
  [Step beams], [{{STEP_BEAMS}}],
  [Stands], [{{STANDS}}],
  [Reinforcements], [{{REINF_MEMBERS}}],
  [Depth reinforcements], [{{DEPTH_REINF}}],
  [Modelled profile length], [{{MODEL_M}} m],
)
"##;

/// Render the service's bill of materials, with the local model's counts
/// alongside for cross-checking.
///
/// # Returns
///
/// * `Ok(Vec<u8>)` - PDF file as bytes
/// * `Err(StairError::Internal)` - If Typst compilation or PDF export fails
pub fn render_bom_pdf(response: &CalculateResponse, summary: &ModelSummary) -> StairResult<Vec<u8>> {
    let dims = &response.dimensions;
    let platform = if dims.platform_active() {
        format!("{} mm", dims.platform_depth)
    } else {
        "none".to_string()
    };

    let source = BOM_TEMPLATE
        .replace("{{DATE}}", &Utc::now().format("%Y-%m-%d").to_string())
        .replace("{{MATERIAL}}", &escape_typst(dims.material.code()))
        .replace("{{FRAME_COLOR}}", &escape_typst(dims.frame_color.display_name()))
        .replace("{{WIDTH}}", &format!("{}", dims.width))
        .replace("{{HEIGHT}}", &format!("{}", dims.height))
        .replace("{{STEPS}}", &dims.step_count().to_string())
        .replace("{{STEP_HEIGHT}}", &format!("{:.1}", dims.step_height))
        .replace("{{STEP_DEPTH}}", &format!("{}", dims.step_depth))
        .replace("{{PLATFORM}}", &platform)
        .replace("{{REINFORCEMENTS}}", &summary.reinforcement_count.to_string())
        .replace("{{TOTAL_MM}}", &format!("{}", response.total_length.mm.value()))
        .replace("{{TOTAL_M}}", &format!("{}", response.total_length.m.value()))
        .replace("{{PAINT_AREA}}", &format!("{}", response.paint.total_area.value()))
        .replace("{{PAINT_WEIGHT}}", &format!("{}", response.paint.total_weight.value()))
        .replace("{{ADDITIONAL}}", &build_additional_section(response))
        .replace("{{BASE_BEAMS}}", &summary.base_beams.to_string())
        .replace("{{STEP_BEAMS}}", &summary.step_beams.to_string())
        .replace("{{STANDS}}", &summary.stands.to_string())
        .replace("{{REINF_MEMBERS}}", &summary.reinforcements.to_string())
        .replace("{{DEPTH_REINF}}", &summary.depth_reinforcements.to_string())
        .replace("{{MODEL_M}}", &format!("{:.2}", summary.frame_profile_length_m.value()));

    compile_pdf(source)
}

fn compile_pdf(source: String) -> StairResult<Vec<u8>> {
    let world = PdfWorld::new(source);

    let warned = typst::compile(&world);

    let document = warned.output.map_err(|errors| {
        let error_msgs: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        StairError::Internal {
            message: format!("Typst compilation failed: {}", error_msgs.join("; ")),
        }
    })?;

    typst_pdf::pdf(&document, &PdfOptions::default()).map_err(|errors| {
        let error_msgs: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        StairError::Internal {
            message: format!("PDF rendering failed: {}", error_msgs.join("; ")),
        }
    })
}

/// Table of optional extras, empty when the service sent none
fn build_additional_section(response: &CalculateResponse) -> String {
    let extra = &response.additional_materials;
    let mut rows = Vec::new();
    if response.dimensions.material.uses_composite_boards() {
        if let Some(color) = &extra.dpk_color {
            rows.push(format!("  [Composite board color], [{}],", escape_typst(color)));
        }
    }
    if let Some(length) = extra.dpk_length {
        rows.push(format!("  [Composite board length], [{} m],", length));
    }
    if let Some(boards) = extra.dpk_boards {
        rows.push(format!("  [Composite boards], [{} pcs],", boards));
    }
    if let Some(bolts) = extra.bolts_count {
        rows.push(format!("  [Bolts], [{} pcs],", bolts));
        rows.push(format!("  [Nuts], [{} pcs],", extra.nuts_count.unwrap_or(bolts)));
    }

    if rows.is_empty() {
        return String::new();
    }
    format!(
        "== Additional Materials\n\n#table(\n  columns: (1fr, 1fr),\n  stroke: 0.5pt + gray,\n{}\n)\n",
        rows.join("\n")
    )
}

/// Escape special Typst characters in user-provided text
fn escape_typst(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '*' => "\\*".to_string(),
            '_' => "\\_".to_string(),
            '#' => "\\#".to_string(),
            '$' => "\\$".to_string(),
            '@' => "\\@".to_string(),
            '<' => "\\<".to_string(),
            '>' => "\\>".to_string(),
            '[' => "\\[".to_string(),
            ']' => "\\]".to_string(),
            '\\' => "\\\\".to_string(),
            '`' => "\\`".to_string(),
            _ => c.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::build;
    use crate::materials::TreadMaterial;
    use crate::policy::GeometryPolicy;
    use crate::service::{AdditionalMaterials, PaintEstimate, TotalLength};
    use crate::staircase::StaircaseSpec;
    use crate::units::{Grams, Meters, Millimeters, SquareMeters};

    fn response() -> CalculateResponse {
        CalculateResponse {
            dimensions: StaircaseSpec::new(1000.0, 800.0, 200.0, TreadMaterial::DpkPlusOnePvl),
            total_length: TotalLength {
                mm: Millimeters(21340.0),
                m: Meters(21.34),
            },
            paint: PaintEstimate {
                total_area: SquareMeters(1.71),
                total_weight: Grams(256.5),
            },
            additional_materials: AdditionalMaterials {
                dpk_color: Some("Венге".to_string()),
                dpk_boards: Some(6),
                bolts_count: Some(12),
                nuts_count: Some(12),
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_pdf_generation() {
        let response = response();
        let model = build(&response.dimensions, &GeometryPolicy::eco()).unwrap();
        let pdf = render_bom_pdf(&response, &model.summary());

        assert!(pdf.is_ok(), "PDF generation failed: {:?}", pdf.err());
        let pdf_bytes = pdf.unwrap();
        assert!(pdf_bytes.starts_with(b"%PDF"), "Output is not a valid PDF");
        assert!(pdf_bytes.len() > 1000, "PDF seems too small");
    }

    #[test]
    fn test_additional_section_skipped_when_empty() {
        let mut response = response();
        response.additional_materials = AdditionalMaterials::default();
        assert!(build_additional_section(&response).is_empty());
    }

    #[test]
    fn test_escape_typst() {
        assert_eq!(escape_typst("a_b#c"), "a\\_b\\#c");
        assert_eq!(escape_typst("ДПК+1 ПВЛ"), "ДПК+1 ПВЛ");
    }
}
