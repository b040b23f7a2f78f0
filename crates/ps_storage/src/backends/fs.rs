use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use futures::future::try_join_all;
use ps_core::{ArticleStore, Error, RankedArticle, Result, SaveReceipt};

use crate::sanitize_filename;

/// Durable store: one JSON document per article in a dated folder under the
/// data directory, optionally alongside the arXiv PDF.
pub struct FsStore {
    root: PathBuf,
    download_pdfs: bool,
    client: reqwest::Client,
}

impl FsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            download_pdfs: false,
            client: reqwest::Client::new(),
        }
    }

    pub fn with_pdf_download(mut self, download_pdfs: bool) -> Self {
        self.download_pdfs = download_pdfs;
        self
    }

    /// Folder for today's date in YYYYMMDD format, created on demand.
    async fn today_folder(&self) -> Result<PathBuf> {
        let folder = self.root.join(Utc::now().format("%Y%m%d").to_string());
        tokio::fs::create_dir_all(&folder).await?;
        Ok(folder)
    }

    async fn fetch_pdf(&self, article: &RankedArticle, folder: &Path) -> Result<()> {
        let link = &article.article.link;
        let id = ps_arxiv::arxiv_id(link).ok_or_else(|| {
            Error::Storage(format!("cannot derive an arXiv id from {}", link))
        })?;
        let url = ps_arxiv::pdf_url(link)
            .ok_or_else(|| Error::Storage(format!("cannot derive a PDF URL from {}", link)))?;

        tracing::debug!("downloading {}", url);
        let bytes = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        tokio::fs::write(folder.join(format!("{}.pdf", id)), &bytes).await?;
        Ok(())
    }
}

#[async_trait]
impl ArticleStore for FsStore {
    fn name(&self) -> &str {
        "fs"
    }

    async fn save_articles(&self, articles: &[RankedArticle]) -> Result<SaveReceipt> {
        let folder = self.today_folder().await?;
        let folder_name = folder
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let mut saved_files = Vec::with_capacity(articles.len());
        for article in articles {
            let filename = format!("{}.json", sanitize_filename(&article.article.title));
            let json = serde_json::to_vec_pretty(article)?;
            tokio::fs::write(folder.join(&filename), json).await?;
            saved_files.push(filename);
        }

        if self.download_pdfs {
            try_join_all(articles.iter().map(|a| self.fetch_pdf(a, &folder))).await?;
        }

        tracing::info!("💾 saved {} articles to {}", articles.len(), folder.display());
        Ok(SaveReceipt {
            message: format!("Articles saved in {} folder", folder_name),
            saved_files,
        })
    }

    /// Dated folders ascending, files in name order within each folder.
    async fn load_saved(&self) -> Result<Vec<RankedArticle>> {
        let mut folders = Vec::new();
        let mut entries = match tokio::fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_dir() {
                folders.push(entry.path());
            }
        }
        folders.sort();

        let mut articles = Vec::new();
        for folder in folders {
            let mut files = Vec::new();
            let mut entries = tokio::fs::read_dir(&folder).await?;
            while let Some(entry) = entries.next_entry().await? {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "json") {
                    files.push(path);
                }
            }
            files.sort();

            for path in files {
                let bytes = tokio::fs::read(&path).await?;
                articles.push(serde_json::from_slice(&bytes)?);
            }
        }
        Ok(articles)
    }
}
