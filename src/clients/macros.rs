/// Generates a client method that sends `$request::$variant` with a oneshot
/// reply channel and waits for the answer. Parameter names must match the
/// variant's field names.
macro_rules! client_method {
    ($client:ty => fn $method:ident($($param:ident: $param_type:ty),*) -> $return_type:ty as $request:ident::$variant:ident, Error = $error_type:ty) => {
        impl $client {
            #[tracing::instrument(skip_all)]
            pub async fn $method(&self, $($param: $param_type),*) -> Result<$return_type, $error_type> {
                tracing::debug!("Sending request");
                let (respond_to, response) = tokio::sync::oneshot::channel();
                self.sender
                    .send($request::$variant {
                        $($param,)*
                        respond_to,
                    })
                    .await
                    .map_err(|_| <$error_type as crate::messages::ChannelError>::channel("Actor closed"))?;

                response
                    .await
                    .map_err(|_| <$error_type as crate::messages::ChannelError>::channel("Actor dropped"))?
            }
        }
    };
}
