//! PNML loader.
//!
//! Reads the subset of the PNML schema described in the interface contract:
//! `<net><page>` containing `<place>`, `<transition>` and `<arc>` elements.
//! Places and transitions are indexed in document order; that order fixes
//! their position in the `I`/`O` matrices and the initial marking vector.
//! Unknown elements and graphical/positional metadata are ignored.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use tracing::instrument;

use super::{Matrix, Net};
use crate::error::{PetriError, Result};

#[derive(Debug, Deserialize)]
struct PnmlDoc {
    net: NetXml,
}

#[derive(Debug, Deserialize)]
struct NetXml {
    #[serde(rename = "page", default)]
    pages: Vec<PageXml>,
}

#[derive(Debug, Deserialize, Default)]
struct PageXml {
    #[serde(rename = "place", default)]
    places: Vec<PlaceXml>,
    #[serde(rename = "transition", default)]
    transitions: Vec<TransitionXml>,
    #[serde(rename = "arc", default)]
    arcs: Vec<ArcXml>,
}

#[derive(Debug, Deserialize)]
struct PlaceXml {
    #[serde(rename = "@id")]
    id: String,
    name: Option<TextWrapper>,
    #[serde(rename = "initialMarking")]
    initial_marking: Option<TextWrapper>,
}

#[derive(Debug, Deserialize)]
struct TransitionXml {
    #[serde(rename = "@id")]
    id: String,
    name: Option<TextWrapper>,
}

#[derive(Debug, Deserialize)]
struct ArcXml {
    #[serde(rename = "@source")]
    source: String,
    #[serde(rename = "@target")]
    target: String,
}

#[derive(Debug, Deserialize)]
struct TextWrapper {
    text: String,
}

/// Parses a PNML file at `path` into a [`Net`]. Does not validate; call
/// [`Net::validate`] afterwards.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load(path: impl AsRef<Path>) -> Result<Net> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            PetriError::InputNotFound(path.display().to_string())
        } else {
            PetriError::Io(e)
        }
    })?;
    parse_str(&contents)
}

/// Parses PNML already read into memory. Exposed separately from [`load`]
/// so tests can exercise parsing without touching the filesystem.
pub fn parse_str(xml: &str) -> Result<Net> {
    let doc: PnmlDoc = quick_xml::de::from_str(xml)
        .map_err(|e| PetriError::MalformedPnml(e.to_string()))?;

    let page = doc
        .net
        .pages
        .into_iter()
        .next()
        .ok_or_else(|| PetriError::MalformedPnml("net has no page element".to_string()))?;

    let mut place_ids = Vec::with_capacity(page.places.len());
    let mut place_names = Vec::with_capacity(page.places.len());
    let mut m0 = Vec::with_capacity(page.places.len());
    let mut place_index: HashMap<String, usize> = HashMap::new();

    for pl in page.places {
        let idx = place_ids.len();
        place_index.insert(pl.id.clone(), idx);
        place_ids.push(pl.id);
        place_names.push(pl.name.map(|n| n.text));
        let marking = match pl.initial_marking {
            Some(im) => im.text.trim().parse::<u32>()?,
            None => 0,
        };
        m0.push(marking);
    }

    let mut trans_ids = Vec::with_capacity(page.transitions.len());
    let mut trans_names = Vec::with_capacity(page.transitions.len());
    let mut trans_index: HashMap<String, usize> = HashMap::new();

    for tr in page.transitions {
        let idx = trans_ids.len();
        trans_index.insert(tr.id.clone(), idx);
        trans_ids.push(tr.id);
        trans_names.push(tr.name.map(|n| n.text));
    }

    let mut i = Matrix::zeros(place_ids.len(), trans_ids.len());
    let mut o = Matrix::zeros(place_ids.len(), trans_ids.len());

    for arc in page.arcs {
        if let (Some(&p), Some(&t)) = (place_index.get(&arc.source), trans_index.get(&arc.target))
        {
            i.increment(super::PlaceId(p), super::TransitionId(t));
            continue;
        }
        if let (Some(&t), Some(&p)) = (trans_index.get(&arc.source), place_index.get(&arc.target))
        {
            o.increment(super::PlaceId(p), super::TransitionId(t));
            continue;
        }
        return Err(PetriError::MalformedPnml(format!(
            "arc {} -> {} does not connect a place and a transition",
            arc.source, arc.target
        )));
    }

    Net::new(place_ids, trans_ids, place_names, trans_names, i, o, m0)
}
