//!
//! Use the generated [`BaseApiClient`] to stream blocks and flash blocks over gRPC.
//!

use std::time::Duration;

use async_trait::async_trait;
use tonic::{
    codec::Streaming,
    metadata::{errors::InvalidMetadataValue, AsciiMetadataValue},
    transport::{Channel, Endpoint},
};

use crate::{
    config::Config,
    errors::{describe, StreamError},
    logging::info,
    proto::{
        base_api_client::BaseApiClient, Block, GetBlockStreamRequest,
        GetRawFlashBlocksStreamRequest, RawFlashBlock,
    },
    transport::{connect_within, Payload, StreamHandle, Transport},
};

/// Metadata key carrying the auth token on every call.
pub const AUTHORIZATION: &str = "authorization";

///
/// Open a plaintext channel to the gRPC endpoint, giving up after `timeout`.
///
/// The channel can be cloned and shared, e.g. by a stream and a [`crate::submitter::TransactionSubmitter`].
///
pub async fn connect_channel(url: &str, timeout: Duration) -> Result<Channel, StreamError> {
    let endpoint =
        Endpoint::from_shared(url.to_string()).map_err(|err| StreamError::connect(url, describe(&err)))?;

    info!("Connecting to GRPC services @ {}", url);

    let channel = connect_within(url, timeout, async {
        endpoint.connect().await.map_err(|err| describe(&err))
    })
    .await?;

    info!("Connected to GRPC services @ {}", url);

    Ok(channel)
}

///
/// Attach the auth token to an outgoing request.
///
pub fn authorize<T>(
    request: &mut tonic::Request<T>,
    auth_token: &str,
) -> Result<(), InvalidMetadataValue> {
    let value: AsciiMetadataValue = auth_token.parse()?;
    request.metadata_mut().insert(AUTHORIZATION, value);
    Ok(())
}

fn invalid_token(err: InvalidMetadataValue) -> StreamError {
    StreamError::Subscribe(format!("auth token rejected: {}", err))
}

/// The two server-streaming calls of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrpcFeed {
    /// `GetBlockStream`, finalized blocks.
    Blocks,
    /// `GetRawFlashBlockStream`, brotli compressed flash blocks.
    FlashBlocks,
}

///
/// Single-attempt gRPC subscription to one [`GrpcFeed`].
///
#[derive(Debug, Clone)]
pub struct GrpcAdapter {
    feed: GrpcFeed,
    url: String,
    auth_token: String,
    connect_timeout: Duration,
}

impl GrpcAdapter {
    pub fn new(feed: GrpcFeed, config: &Config) -> Self {
        let connect_timeout = match feed {
            GrpcFeed::Blocks => config.block_connect_timeout(),
            GrpcFeed::FlashBlocks => config.flash_connect_timeout(),
        };

        Self {
            feed,
            url: config.grpc_url.clone(),
            auth_token: config.auth_token.clone(),
            connect_timeout,
        }
    }

    /// The regular block feed.
    pub fn blocks(config: &Config) -> Self {
        Self::new(GrpcFeed::Blocks, config)
    }

    /// The flash block feed.
    pub fn flash_blocks(config: &Config) -> Self {
        Self::new(GrpcFeed::FlashBlocks, config)
    }

    pub fn feed(&self) -> GrpcFeed {
        self.feed
    }

    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }
}

#[async_trait]
impl Transport for GrpcAdapter {
    type Connection = Channel;
    type Handle = GrpcStream;

    fn name(&self) -> &str {
        match self.feed {
            GrpcFeed::Blocks => "BlockStream",
            GrpcFeed::FlashBlocks => "FlashStream",
        }
    }

    fn endpoint(&self) -> &str {
        &self.url
    }

    async fn connect(&mut self) -> Result<Channel, StreamError> {
        connect_channel(&self.url, self.connect_timeout).await
    }

    async fn subscribe(&mut self, channel: Channel) -> Result<GrpcStream, StreamError> {
        let mut client = BaseApiClient::new(channel);

        let stream = match self.feed {
            GrpcFeed::Blocks => {
                let mut request = tonic::Request::new(GetBlockStreamRequest {});
                authorize(&mut request, &self.auth_token).map_err(invalid_token)?;
                let response = client
                    .get_block_stream(request)
                    .await
                    .map_err(|status| StreamError::Subscribe(status.to_string()))?;
                GrpcStream::Blocks(response.into_inner())
            }
            GrpcFeed::FlashBlocks => {
                let mut request = tonic::Request::new(GetRawFlashBlocksStreamRequest {});
                authorize(&mut request, &self.auth_token).map_err(invalid_token)?;
                let response = client
                    .get_raw_flash_block_stream(request)
                    .await
                    .map_err(|status| StreamError::Subscribe(status.to_string()))?;
                GrpcStream::FlashBlocks(response.into_inner())
            }
        };

        Ok(stream)
    }
}

///
/// A live gRPC subscription.
///
pub enum GrpcStream {
    Blocks(Streaming<Block>),
    FlashBlocks(Streaming<RawFlashBlock>),
}

#[async_trait]
impl StreamHandle for GrpcStream {
    async fn next(&mut self) -> Result<Payload, StreamError> {
        match self {
            Self::Blocks(stream) => match stream.message().await? {
                Some(block) => Ok(Payload::Block(block)),
                None => Err(StreamError::EndOfStream),
            },
            Self::FlashBlocks(stream) => match stream.message().await? {
                Some(flash_block) => Ok(Payload::Compressed(flash_block.message)),
                None => Err(StreamError::EndOfStream),
            },
        }
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use std::{pin::Pin, sync::Mutex};

    use futures_util::{stream, Stream};
    use tokio::net::TcpListener;
    use tonic::{transport::Server, Request, Response, Status};

    use super::AUTHORIZATION;
    use crate::proto::{
        base_api_server::{BaseApi, BaseApiServer},
        Block, GetBlockStreamRequest, GetRawFlashBlocksStreamRequest, RawFlashBlock,
        SendTransactionRequest, SendTransactionResponse,
    };

    /// The only token the local service accepts.
    pub(crate) const TOKEN: &str = "grpc-secret";

    type ResponseStream<T> = Pin<Box<dyn Stream<Item = Result<T, Status>> + Send>>;

    /// Local `BaseApi` replaying canned messages once.
    #[derive(Default)]
    pub(crate) struct MockBaseApi {
        pub blocks: Mutex<Vec<Result<Block, Status>>>,
        pub flash_blocks: Mutex<Vec<Result<RawFlashBlock, Status>>>,
        pub refuse_streams: bool,
        pub tx_hash: String,
    }

    fn check_auth<T>(request: &Request<T>) -> Result<(), Status> {
        match request.metadata().get(AUTHORIZATION) {
            Some(value) if value.to_str().ok() == Some(TOKEN) => Ok(()),
            _ => Err(Status::unauthenticated("invalid auth token")),
        }
    }

    fn replay<T: Send + 'static>(frames: &Mutex<Vec<Result<T, Status>>>) -> ResponseStream<T> {
        let frames = std::mem::take(&mut *frames.lock().unwrap());
        Box::pin(stream::iter(frames))
    }

    #[tonic::async_trait]
    impl BaseApi for MockBaseApi {
        type GetBlockStreamStream = ResponseStream<Block>;
        type GetRawFlashBlockStreamStream = ResponseStream<RawFlashBlock>;

        async fn get_block_stream(
            &self,
            request: Request<GetBlockStreamRequest>,
        ) -> Result<Response<Self::GetBlockStreamStream>, Status> {
            check_auth(&request)?;
            if self.refuse_streams {
                return Err(Status::permission_denied("feed disabled"));
            }
            Ok(Response::new(replay(&self.blocks)))
        }

        async fn get_raw_flash_block_stream(
            &self,
            request: Request<GetRawFlashBlocksStreamRequest>,
        ) -> Result<Response<Self::GetRawFlashBlockStreamStream>, Status> {
            check_auth(&request)?;
            if self.refuse_streams {
                return Err(Status::permission_denied("feed disabled"));
            }
            Ok(Response::new(replay(&self.flash_blocks)))
        }

        async fn send_transaction(
            &self,
            request: Request<SendTransactionRequest>,
        ) -> Result<Response<SendTransactionResponse>, Status> {
            check_auth(&request)?;
            if !request.get_ref().raw_transaction.starts_with("0x") {
                return Err(Status::invalid_argument("expected 0x prefixed hex"));
            }
            Ok(Response::new(SendTransactionResponse {
                tx_hash: self.tx_hash.clone(),
            }))
        }
    }

    /// Serve `api` on an ephemeral local port, returning its url.
    pub(crate) async fn serve(api: MockBaseApi) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());

        let incoming = Box::pin(stream::unfold(listener, |listener| async move {
            let accepted = listener.accept().await.map(|(socket, _)| socket);
            Some((accepted, listener))
        }));
        tokio::spawn(
            Server::builder()
                .add_service(BaseApiServer::new(api))
                .serve_with_incoming(incoming),
        );

        url
    }
}
