/// Generates the typed `list_*` / `create_*` pair over a `ResourceClient`.
///
/// Every transport or query fault collapses into `DataError::Remote`.
#[macro_export]
macro_rules! impl_collection_methods {
    ($client_name:ident, $entity:ty, $singular:ident, $plural:ident) => {
        paste::paste! {
            #[allow(dead_code)]
            impl $client_name {
                #[tracing::instrument(skip(self))]
                pub async fn [<list_ $plural>](
                    &self,
                    query: crate::actor_framework::ListQuery,
                ) -> Result<Vec<$entity>, crate::error::DataError> {
                    tracing::debug!("Sending request");
                    self.inner.list(query).await.map_err(Into::into)
                }

                #[tracing::instrument(skip(self, record), fields(id = %record.id))]
                pub async fn [<create_ $singular>](
                    &self,
                    record: $entity,
                ) -> Result<$entity, crate::error::DataError> {
                    tracing::debug!("Sending request");
                    self.inner.create(record).await.map_err(Into::into)
                }
            }
        }
    };
}

#[macro_export]
macro_rules! impl_client_new {
    ($client_name:ident, $entity:ty) => {
        impl $client_name {
            pub fn new(inner: crate::actor_framework::ResourceClient<$entity>) -> Self {
                Self { inner }
            }
        }
    };
}

#[macro_export]
macro_rules! impl_collection_client {
    ($client_name:ident, $entity:ty, $singular:ident, $plural:ident) => {
        impl_client_new!($client_name, $entity);
        impl_collection_methods!($client_name, $entity, $singular, $plural);
    };
}

/// Generates a request/reply method for an actor behind an `mpsc` sender.
macro_rules! client_method {
    ($client:ty => fn $method:ident($($param:ident: $param_type:ty),*) -> $return_type:ty as $request:ident::$variant:ident, Error = $error_type:ty) => {
        impl $client {
            #[tracing::instrument(skip(self))]
            pub async fn $method(&self, $($param: $param_type),*) -> Result<$return_type, $error_type> {
                tracing::debug!("Sending request");
                let (respond_to, response) = tokio::sync::oneshot::channel();
                self.sender.send($request::$variant {
                    $($param,)*
                    respond_to,
                }).await.map_err(|_| <$error_type>::ActorCommunicationError("Actor closed".to_string()))?;

                response.await.map_err(|_| <$error_type>::ActorCommunicationError("Actor dropped".to_string()))?
            }
        }
    };
}
