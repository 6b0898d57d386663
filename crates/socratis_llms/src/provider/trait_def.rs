use async_trait::async_trait;
use futures::StreamExt;

use crate::error::Result;
use crate::types::{GenerateRequest, GenerateResponse, GenerateStream, StreamEvent};

#[async_trait]
pub trait Provider: Send + Sync {
    fn provider_id(&self) -> &str;

    /// Known model identifiers. Providers without a models endpoint return a
    /// fixed list.
    async fn list_models(&self) -> Result<Vec<String>> {
        Ok(Vec::new())
    }

    /// Opens a streaming generation. Errors here mean the stream never
    /// started; errors yielded by the stream mean it broke part way.
    async fn stream(&self, request: GenerateRequest) -> Result<GenerateStream>;

    /// Collects a whole stream into one response.
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse> {
        let mut stream = self.stream(request).await?;
        let mut response = GenerateResponse::default();
        while let Some(event) = stream.next().await {
            match event? {
                StreamEvent::TextDelta { delta } => response.text.push_str(&delta),
                StreamEvent::Finish { usage, reason } => {
                    response.usage = usage;
                    response.finish_reason = Some(reason);
                }
            }
        }
        Ok(response)
    }
}
