use crate::api::types::{
    DocumentRecord, FileEntry, FileListResponse, FinancialReportRecord, Market, MindmapContentResponse,
    MindmapEntry, MindmapListResponse, ReportRequest, ReportResponse,
};
use crate::core::config::ViewerConfig;
use crate::core::types::Backend;
use crate::error::FetchError;
use mime::APPLICATION_JSON;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use url::Url;

/// `reqwest` client for the report and document API.
#[derive(Clone, Debug)]
pub struct HttpBackend {
    client: Client,
    base_url: Url,
}

impl HttpBackend {
    pub fn new(config: &ViewerConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;
        Ok(Self::with_client(client, config.base_url.clone()))
    }

    pub fn with_client(client: Client, mut base_url: Url) -> Self {
        // Url::join drops the last path segment unless it ends with '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, FetchError> {
        self.base_url
            .join(path)
            .map_err(|e| FetchError::Transport(format!("invalid endpoint {}: {}", path, e)))
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, FetchError> {
        let response = request.send().await?;
        log::debug!("Response status: {} for {}", response.status(), response.url());

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().as_u16()));
        }

        let body = response.text().await?;
        log::debug!("Received content length: {}", body.len());
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait::async_trait]
impl Backend for HttpBackend {
    async fn financial_report(
        &self,
        company: &str,
        market: Option<Market>,
    ) -> Result<FinancialReportRecord, FetchError> {
        let url = self.endpoint("api/financial-report")?;
        log::debug!("Fetching financial report for {:?} (market {:?})", company, market);

        let request = self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, APPLICATION_JSON.as_ref())
            .json(&ReportRequest { company, market });
        let response: ReportResponse = self.send_json(request).await?;

        if !response.success {
            return Err(FetchError::Backend(response.message));
        }
        Ok(serde_json::from_value(response.data)?)
    }

    async fn markdown_files(&self) -> Result<Vec<FileEntry>, FetchError> {
        let url = self.endpoint("api/markdown/list")?;
        let response: FileListResponse = self.send_json(self.client.get(url)).await?;
        Ok(response.files)
    }

    async fn markdown_content(&self, path: &str) -> Result<DocumentRecord, FetchError> {
        let mut url = self.endpoint("api/markdown/content")?;
        url.query_pairs_mut().append_pair("path", path);
        log::debug!("Fetching markdown content: {}", url);
        self.send_json(self.client.get(url)).await
    }

    async fn mindmaps(&self) -> Result<Vec<MindmapEntry>, FetchError> {
        let url = self.endpoint("api/mindmaps")?;
        let response: MindmapListResponse = self.send_json(self.client.get(url)).await?;
        Ok(response.mindmaps)
    }

    async fn mindmap(&self, filename: &str) -> Result<String, FetchError> {
        let mut url = self.endpoint("api/mindmap/")?;
        url.path_segments_mut()
            .map_err(|_| FetchError::Transport(format!("base URL cannot hold a path: {}", self.base_url)))?
            .pop_if_empty()
            .push(filename);
        let response: MindmapContentResponse = self.send_json(self.client.get(url)).await?;
        Ok(response.content)
    }
}
