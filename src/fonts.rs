use std::sync::Arc;

use usvg::fontdb;

use crate::error::{OgcardError, OgcardResult};

/// Concrete families tried after the generic `sans-serif` query. The
/// generic query resolves through the host's fontconfig alias table, which
/// slim installs often lack, so a miss there does not mean no face exists.
const FALLBACK_FAMILIES: [&str; 4] = ["DejaVu Sans", "Liberation Sans", "Arial", "Helvetica"];

#[derive(Clone, Debug)]
/// Raw bytes of one system font face plus its index within the file
/// (non-zero for collection formats like TTC).
pub struct FontFace {
    pub bytes: Arc<Vec<u8>>,
    pub index: u32,
}

#[derive(Clone, Debug)]
/// The sans-serif pair the raster composer draws with.
pub struct SansSerifFonts {
    pub regular: FontFace,
    pub bold: FontFace,
}

/// Resolve a sans-serif family from the host's installed fonts.
///
/// This decides raster availability: it tries the generic `sans-serif`
/// alias, then well-known concrete families, then any upright face, and
/// only a database with nothing usable yields
/// [`OgcardError::RasterUnavailable`] — callers fall through to the vector
/// path on that error.
pub fn load_system_sans_serif() -> OgcardResult<SansSerifFonts> {
    let mut db = fontdb::Database::new();
    db.load_system_fonts();

    let regular = query_face(&db, fontdb::Weight::NORMAL)?;
    // A missing bold face is not fatal; the regular face stands in.
    let bold = query_face(&db, fontdb::Weight::BOLD).unwrap_or_else(|_| regular.clone());
    Ok(SansSerifFonts { regular, bold })
}

fn query_face(db: &fontdb::Database, weight: fontdb::Weight) -> OgcardResult<FontFace> {
    let mut families = vec![fontdb::Family::SansSerif];
    families.extend(FALLBACK_FAMILIES.iter().copied().map(fontdb::Family::Name));
    let query = fontdb::Query {
        families: &families,
        weight,
        stretch: fontdb::Stretch::Normal,
        style: fontdb::Style::Normal,
    };

    let id = db
        .query(&query)
        .or_else(|| closest_upright_face(db, weight))
        .ok_or_else(|| {
            OgcardError::raster_unavailable(format!(
                "no usable sans-serif face for weight {}",
                weight.0
            ))
        })?;
    db.with_face_data(id, |data, index| FontFace {
        bytes: Arc::new(data.to_vec()),
        index,
    })
    .ok_or_else(|| OgcardError::raster_unavailable("sans-serif face data could not be loaded"))
}

/// Last resort after every family query missed: any upright face in the
/// database, preferring the one closest to the requested weight.
fn closest_upright_face(db: &fontdb::Database, weight: fontdb::Weight) -> Option<fontdb::ID> {
    db.faces()
        .filter(|face| face.style == fontdb::Style::Normal)
        .min_by_key(|face| (i32::from(face.weight.0) - i32::from(weight.0)).abs())
        .map(|face| face.id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_succeeds_whenever_an_upright_face_is_installed() {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        let has_upright = db
            .faces()
            .any(|face| face.style == fontdb::Style::Normal);

        match load_system_sans_serif() {
            Ok(fonts) => assert!(!fonts.regular.bytes.is_empty()),
            Err(err) => assert!(
                !has_upright,
                "lookup reported unavailable with upright faces installed: {err}"
            ),
        }
    }

    #[test]
    fn empty_database_reports_raster_unavailable() {
        let db = fontdb::Database::new();
        assert!(closest_upright_face(&db, fontdb::Weight::NORMAL).is_none());
        let err = query_face(&db, fontdb::Weight::NORMAL).unwrap_err();
        assert!(err.to_string().contains("raster backend unavailable:"));
    }
}
