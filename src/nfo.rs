//! `tvshow.nfo` sidecar written next to the season folders.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::{OrganizeError, Result};
use crate::tmdb::{air_year, ShowDetails};

pub const NFO_FILENAME: &str = "tvshow.nfo";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TvShowNfo {
    pub title: String,
    pub original_title: String,
    pub tmdb_id: u64,
    pub plot: String,
    pub rating: f64,
    pub votes: u64,
    pub year: String,
    pub premiered: String,
}

impl TvShowNfo {
    pub fn from_details(details: &ShowDetails) -> Self {
        let premiered = details.first_air_date.clone().unwrap_or_default();
        Self {
            title: details.name.clone(),
            original_title: details.original_name.clone(),
            tmdb_id: details.id,
            plot: details.overview.clone(),
            rating: details.vote_average,
            votes: details.vote_count,
            year: air_year(Some(premiered.as_str())).unwrap_or_default().to_string(),
            premiered,
        }
    }

    pub fn to_xml(&self) -> Result<String> {
        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

        write_event(&mut writer, Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        write_event(&mut writer, Event::Start(BytesStart::new("tvshow")))?;
        write_text_element(&mut writer, "title", &self.title)?;
        write_text_element(&mut writer, "originaltitle", &self.original_title)?;
        write_text_element(&mut writer, "tmdbid", &self.tmdb_id.to_string())?;
        write_text_element(&mut writer, "plot", &self.plot)?;
        write_text_element(&mut writer, "rating", &self.rating.to_string())?;
        write_text_element(&mut writer, "votes", &self.votes.to_string())?;
        write_text_element(&mut writer, "year", &self.year)?;
        write_text_element(&mut writer, "premiered", &self.premiered)?;
        write_event(&mut writer, Event::End(BytesEnd::new("tvshow")))?;

        String::from_utf8(writer.into_inner().into_inner())
            .map_err(|e| OrganizeError::Sidecar(e.to_string()))
    }

    pub fn from_xml(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut nfo = TvShowNfo::default();
        let mut tmdb_id = None;
        let mut current_tag = String::new();

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => {
                    current_tag = String::from_utf8_lossy(e.name().as_ref()).to_string();
                }
                Ok(Event::Text(ref e)) => {
                    let text = e
                        .unescape()
                        .map_err(|e| OrganizeError::Sidecar(e.to_string()))?
                        .to_string();

                    match current_tag.as_str() {
                        "title" => nfo.title = text,
                        "originaltitle" => nfo.original_title = text,
                        "tmdbid" => tmdb_id = text.trim().parse().ok(),
                        "plot" => nfo.plot = text,
                        "rating" => nfo.rating = text.trim().parse().unwrap_or_default(),
                        "votes" => nfo.votes = text.trim().parse().unwrap_or_default(),
                        "year" => nfo.year = text,
                        "premiered" => nfo.premiered = text,
                        _ => {}
                    }
                }
                Ok(Event::End(_)) => current_tag.clear(),
                Ok(Event::Eof) => break,
                Err(e) => return Err(OrganizeError::Sidecar(e.to_string())),
                _ => {}
            }
        }

        nfo.tmdb_id = tmdb_id.ok_or_else(|| OrganizeError::Sidecar("missing tmdbid".to_string()))?;
        Ok(nfo)
    }

    /// Write `<dir>/tvshow.nfo`, replacing any previous file.
    pub fn write(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(NFO_FILENAME);
        std::fs::write(&path, self.to_xml()?)?;
        info!("Wrote {}", path.display());
        Ok(path)
    }

    pub fn read(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(OrganizeError::MissingSidecar(path.to_path_buf()));
        }
        let xml = std::fs::read_to_string(path)?;
        Self::from_xml(&xml)
    }
}

fn write_event(writer: &mut Writer<Cursor<Vec<u8>>>, event: Event<'_>) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|e| OrganizeError::Sidecar(e.to_string()))
}

fn write_text_element(writer: &mut Writer<Cursor<Vec<u8>>>, name: &str, text: &str) -> Result<()> {
    write_event(writer, Event::Start(BytesStart::new(name)))?;
    write_event(writer, Event::Text(BytesText::new(text)))?;
    write_event(writer, Event::End(BytesEnd::new(name)))
}
