//!
//! Client and server stubs for the `basepb.BaseApi` service, generated from `proto/base.proto`.
//!

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetBlockStreamRequest {}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Block {
    #[prost(uint64, tag = "1")]
    pub block_number: u64,
    #[prost(string, tag = "2")]
    pub block_hash: ::prost::alloc::string::String,
    #[prost(bytes = "vec", repeated, tag = "3")]
    pub transactions: ::prost::alloc::vec::Vec<::prost::alloc::vec::Vec<u8>>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetRawFlashBlocksStreamRequest {}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RawFlashBlock {
    #[prost(bytes = "vec", tag = "1")]
    pub message: ::prost::alloc::vec::Vec<u8>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SendTransactionRequest {
    #[prost(string, tag = "1")]
    pub raw_transaction: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SendTransactionResponse {
    #[prost(string, tag = "1")]
    pub tx_hash: ::prost::alloc::string::String,
}
/// Generated client implementations.
pub mod base_api_client {
    #![allow(unused_variables, dead_code, missing_docs, clippy::let_unit_value)]
    use tonic::codegen::*;
    #[derive(Debug, Clone)]
    pub struct BaseApiClient<T> {
        inner: tonic::client::Grpc<T>,
    }
    impl<T> BaseApiClient<T>
    where
        T: tonic::client::GrpcService<tonic::body::BoxBody>,
        T::Error: Into<StdError>,
        T::ResponseBody: Body<Data = Bytes> + Send + 'static,
        <T::ResponseBody as Body>::Error: Into<StdError> + Send,
    {
        pub fn new(inner: T) -> Self {
            let inner = tonic::client::Grpc::new(inner);
            Self { inner }
        }
        pub fn with_interceptor<F>(
            inner: T,
            interceptor: F,
        ) -> BaseApiClient<InterceptedService<T, F>>
        where
            F: tonic::service::Interceptor,
            T::ResponseBody: Default,
            T: tonic::codegen::Service<
                http::Request<tonic::body::BoxBody>,
                Response = http::Response<
                    <T as tonic::client::GrpcService<tonic::body::BoxBody>>::ResponseBody,
                >,
            >,
            <T as tonic::codegen::Service<
                http::Request<tonic::body::BoxBody>,
            >>::Error: Into<StdError> + Send + Sync,
        {
            BaseApiClient::new(InterceptedService::new(inner, interceptor))
        }
        /// Finalized blocks, one message per block.
        pub async fn get_block_stream(
            &mut self,
            request: impl tonic::IntoRequest<super::GetBlockStreamRequest>,
        ) -> Result<
            tonic::Response<tonic::codec::Streaming<super::Block>>,
            tonic::Status,
        > {
            self.inner
                .ready()
                .await
                .map_err(|e| {
                    tonic::Status::new(
                        tonic::Code::Unknown,
                        format!("Service was not ready: {}", e.into()),
                    )
                })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static(
                "/basepb.BaseApi/GetBlockStream",
            );
            self.inner.server_streaming(request.into_request(), path, codec).await
        }
        /// Flash blocks, brotli compressed JSON documents.
        pub async fn get_raw_flash_block_stream(
            &mut self,
            request: impl tonic::IntoRequest<super::GetRawFlashBlocksStreamRequest>,
        ) -> Result<
            tonic::Response<tonic::codec::Streaming<super::RawFlashBlock>>,
            tonic::Status,
        > {
            self.inner
                .ready()
                .await
                .map_err(|e| {
                    tonic::Status::new(
                        tonic::Code::Unknown,
                        format!("Service was not ready: {}", e.into()),
                    )
                })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static(
                "/basepb.BaseApi/GetRawFlashBlockStream",
            );
            self.inner.server_streaming(request.into_request(), path, codec).await
        }
        pub async fn send_transaction(
            &mut self,
            request: impl tonic::IntoRequest<super::SendTransactionRequest>,
        ) -> Result<tonic::Response<super::SendTransactionResponse>, tonic::Status> {
            self.inner
                .ready()
                .await
                .map_err(|e| {
                    tonic::Status::new(
                        tonic::Code::Unknown,
                        format!("Service was not ready: {}", e.into()),
                    )
                })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static(
                "/basepb.BaseApi/SendTransaction",
            );
            self.inner.unary(request.into_request(), path, codec).await
        }
    }
}
/// Generated server implementations.
pub mod base_api_server {
    #![allow(unused_variables, dead_code, missing_docs, clippy::let_unit_value)]
    use tonic::codegen::*;
    /// Generated trait containing gRPC methods that should be implemented for use with BaseApiServer.
    #[async_trait]
    pub trait BaseApi: Send + Sync + 'static {
        /// Server streaming response type for the GetBlockStream method.
        type GetBlockStreamStream: futures_core::Stream<
                Item = Result<super::Block, tonic::Status>,
            >
            + Send
            + 'static;
        /// Finalized blocks, one message per block.
        async fn get_block_stream(
            &self,
            request: tonic::Request<super::GetBlockStreamRequest>,
        ) -> Result<tonic::Response<Self::GetBlockStreamStream>, tonic::Status>;
        /// Server streaming response type for the GetRawFlashBlockStream method.
        type GetRawFlashBlockStreamStream: futures_core::Stream<
                Item = Result<super::RawFlashBlock, tonic::Status>,
            >
            + Send
            + 'static;
        /// Flash blocks, brotli compressed JSON documents.
        async fn get_raw_flash_block_stream(
            &self,
            request: tonic::Request<super::GetRawFlashBlocksStreamRequest>,
        ) -> Result<tonic::Response<Self::GetRawFlashBlockStreamStream>, tonic::Status>;
        async fn send_transaction(
            &self,
            request: tonic::Request<super::SendTransactionRequest>,
        ) -> Result<tonic::Response<super::SendTransactionResponse>, tonic::Status>;
    }
    #[derive(Debug)]
    pub struct BaseApiServer<T: BaseApi> {
        inner: _Inner<T>,
        accept_compression_encodings: EnabledCompressionEncodings,
        send_compression_encodings: EnabledCompressionEncodings,
    }
    struct _Inner<T>(Arc<T>);
    impl<T: BaseApi> BaseApiServer<T> {
        pub fn new(inner: T) -> Self {
            Self::from_arc(Arc::new(inner))
        }
        pub fn from_arc(inner: Arc<T>) -> Self {
            let inner = _Inner(inner);
            Self {
                inner,
                accept_compression_encodings: Default::default(),
                send_compression_encodings: Default::default(),
            }
        }
        pub fn with_interceptor<F>(
            inner: T,
            interceptor: F,
        ) -> InterceptedService<Self, F>
        where
            F: tonic::service::Interceptor,
        {
            InterceptedService::new(Self::new(inner), interceptor)
        }
    }
    impl<T, B> tonic::codegen::Service<http::Request<B>> for BaseApiServer<T>
    where
        T: BaseApi,
        B: Body + Send + 'static,
        B::Error: Into<StdError> + Send + 'static,
    {
        type Response = http::Response<tonic::body::BoxBody>;
        type Error = std::convert::Infallible;
        type Future = BoxFuture<Self::Response, Self::Error>;
        fn poll_ready(
            &mut self,
            _cx: &mut Context<'_>,
        ) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }
        fn call(&mut self, req: http::Request<B>) -> Self::Future {
            let inner = self.inner.clone();
            match req.uri().path() {
                "/basepb.BaseApi/GetBlockStream" => {
                    #[allow(non_camel_case_types)]
                    struct GetBlockStreamSvc<T: BaseApi>(pub Arc<T>);
                    impl<
                        T: BaseApi,
                    > tonic::server::ServerStreamingService<super::GetBlockStreamRequest>
                    for GetBlockStreamSvc<T> {
                        type Response = super::Block;
                        type ResponseStream = T::GetBlockStreamStream;
                        type Future = BoxFuture<
                            tonic::Response<Self::ResponseStream>,
                            tonic::Status,
                        >;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::GetBlockStreamRequest>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move {
                                (*inner).get_block_stream(request).await
                            };
                            Box::pin(fut)
                        }
                    }
                    let accept_compression_encodings = self.accept_compression_encodings;
                    let send_compression_encodings = self.send_compression_encodings;
                    let inner = self.inner.clone();
                    let fut = async move {
                        let inner = inner.0;
                        let method = GetBlockStreamSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = tonic::server::Grpc::new(codec)
                            .apply_compression_config(
                                accept_compression_encodings,
                                send_compression_encodings,
                            );
                        let res = grpc.server_streaming(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/basepb.BaseApi/GetRawFlashBlockStream" => {
                    #[allow(non_camel_case_types)]
                    struct GetRawFlashBlockStreamSvc<T: BaseApi>(pub Arc<T>);
                    impl<
                        T: BaseApi,
                    > tonic::server::ServerStreamingService<
                        super::GetRawFlashBlocksStreamRequest,
                    > for GetRawFlashBlockStreamSvc<T> {
                        type Response = super::RawFlashBlock;
                        type ResponseStream = T::GetRawFlashBlockStreamStream;
                        type Future = BoxFuture<
                            tonic::Response<Self::ResponseStream>,
                            tonic::Status,
                        >;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::GetRawFlashBlocksStreamRequest>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move {
                                (*inner).get_raw_flash_block_stream(request).await
                            };
                            Box::pin(fut)
                        }
                    }
                    let accept_compression_encodings = self.accept_compression_encodings;
                    let send_compression_encodings = self.send_compression_encodings;
                    let inner = self.inner.clone();
                    let fut = async move {
                        let inner = inner.0;
                        let method = GetRawFlashBlockStreamSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = tonic::server::Grpc::new(codec)
                            .apply_compression_config(
                                accept_compression_encodings,
                                send_compression_encodings,
                            );
                        let res = grpc.server_streaming(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/basepb.BaseApi/SendTransaction" => {
                    #[allow(non_camel_case_types)]
                    struct SendTransactionSvc<T: BaseApi>(pub Arc<T>);
                    impl<
                        T: BaseApi,
                    > tonic::server::UnaryService<super::SendTransactionRequest>
                    for SendTransactionSvc<T> {
                        type Response = super::SendTransactionResponse;
                        type Future = BoxFuture<
                            tonic::Response<Self::Response>,
                            tonic::Status,
                        >;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::SendTransactionRequest>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move {
                                (*inner).send_transaction(request).await
                            };
                            Box::pin(fut)
                        }
                    }
                    let accept_compression_encodings = self.accept_compression_encodings;
                    let send_compression_encodings = self.send_compression_encodings;
                    let inner = self.inner.clone();
                    let fut = async move {
                        let inner = inner.0;
                        let method = SendTransactionSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = tonic::server::Grpc::new(codec)
                            .apply_compression_config(
                                accept_compression_encodings,
                                send_compression_encodings,
                            );
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                _ => {
                    Box::pin(async move {
                        Ok(
                            http::Response::builder()
                                .status(200)
                                .header("grpc-status", "12")
                                .header("content-type", "application/grpc")
                                .body(empty_body())
                                .unwrap(),
                        )
                    })
                }
            }
        }
    }
    impl<T: BaseApi> Clone for BaseApiServer<T> {
        fn clone(&self) -> Self {
            let inner = self.inner.clone();
            Self {
                inner,
                accept_compression_encodings: self.accept_compression_encodings,
                send_compression_encodings: self.send_compression_encodings,
            }
        }
    }
    impl<T: BaseApi> Clone for _Inner<T> {
        fn clone(&self) -> Self {
            Self(self.0.clone())
        }
    }
    impl<T: std::fmt::Debug> std::fmt::Debug for _Inner<T> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{:?}", self.0)
        }
    }
    impl<T: BaseApi> tonic::server::NamedService for BaseApiServer<T> {
        const NAME: &'static str = "basepb.BaseApi";
    }
}
