use crate::core::error::Result;
use crate::core::types::FieldKind;
use std::fs;
use std::path::PathBuf;

/// On-disk directory layout rooted at `Config::storage_root`:
///
/// ```text
/// <root>/
///   postings_gcp/
///     postings_body/    {shard}_{block:03}.bin, body.descriptor
///     postings_title/   {shard}_{block:03}.bin, title.descriptor
///     postings_anchor/  {shard}_{block:03}.bin, anchor.descriptor
///   id_to_title/        titles.bin
///   pageviews/           pageviews.txt
///   pr/                  part-*.csv.gz
/// ```
///
/// Named `postings_gcp` to match the object-store prefix the original
/// loader uploads under; this crate only ever reads and writes it locally.
#[derive(Debug, Clone)]
pub struct StorageLayout {
    pub root: PathBuf,
}

impl StorageLayout {
    pub fn new(root: PathBuf) -> Result<Self> {
        let layout = StorageLayout { root };
        for field in FieldKind::ALL {
            fs::create_dir_all(layout.field_dir(field))?;
        }
        fs::create_dir_all(layout.id_to_title_dir())?;
        fs::create_dir_all(layout.pageviews_dir())?;
        fs::create_dir_all(layout.page_rank_dir())?;
        Ok(layout)
    }

    pub fn field_dir(&self, field: FieldKind) -> PathBuf {
        self.root.join("postings_gcp").join(field.folder_name())
    }

    pub fn descriptor_path(&self, field: FieldKind) -> PathBuf {
        let name = match field {
            FieldKind::Body => "body.descriptor",
            FieldKind::Title => "title.descriptor",
            FieldKind::Anchor => "anchor.descriptor",
        };
        self.field_dir(field).join(name)
    }

    /// Path of the `block`'th shard file for `shard_id` within `field`'s
    /// directory, matching the original `{shard}_{block:03}.bin` naming.
    pub fn shard_block_path(&self, field: FieldKind, shard_id: u32, block: u32) -> PathBuf {
        self.field_dir(field)
            .join(format!("{shard_id}_{block:03}.bin"))
    }

    pub fn id_to_title_dir(&self) -> PathBuf {
        self.root.join("id_to_title")
    }

    pub fn title_map_path(&self) -> PathBuf {
        self.id_to_title_dir().join("titles.bin")
    }

    pub fn pageviews_dir(&self) -> PathBuf {
        self.root.join("pageviews")
    }

    pub fn pageviews_path(&self) -> PathBuf {
        self.pageviews_dir().join("pageviews.txt")
    }

    pub fn page_rank_dir(&self) -> PathBuf {
        self.root.join("pr")
    }
}
