//! Identity middleware for the marketplace server.
//! This middleware can be placed on any route or service.
//!
//! It reads the caller's profile id from the `profile_id` header and loads the matching profile through the
//! [`AccountApi`] registered as app data. The profile is stored in the request extensions, where handlers pick it up
//! with `web::ReqData<Profile>`. Requests without a usable header, or for a profile that does not exist, are rejected
//! with 401 Unauthorized.
use std::{marker::PhantomData, pin::Pin, rc::Rc};

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    web,
    Error,
    HttpMessage,
};
use futures::{
    future::{ok, Ready},
    Future,
};
use log::*;
use marketplace_engine::{AccountApi, ProfileManagement};

use crate::errors::ServerError;

pub const PROFILE_ID_HEADER: &str = "profile_id";

pub struct ProfileResolverFactory<B> {
    _backend: PhantomData<fn() -> B>,
}

impl<B> ProfileResolverFactory<B> {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self { _backend: PhantomData }
    }
}

impl<S, Body, B> Transform<S, ServiceRequest> for ProfileResolverFactory<B>
where
    S: Service<ServiceRequest, Response = ServiceResponse<Body>, Error = Error> + 'static,
    S::Future: 'static,
    Body: 'static,
    B: ProfileManagement + 'static,
{
    type Response = ServiceResponse<Body>;
    type Error = Error;
    type Transform = ProfileResolverService<S, B>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(ProfileResolverService { service: Rc::new(service), _backend: PhantomData })
    }
}

pub struct ProfileResolverService<S, B> {
    service: Rc<S>,
    _backend: PhantomData<fn() -> B>,
}

impl<S, Body, B> Service<ServiceRequest> for ProfileResolverService<S, B>
where
    S: Service<ServiceRequest, Response = ServiceResponse<Body>, Error = Error> + 'static,
    S::Future: 'static,
    Body: 'static,
    B: ProfileManagement + 'static,
{
    type Response = ServiceResponse<Body>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        Box::pin(async move {
            let profile_id = profile_id_from_header(&req)?;
            let api = req.app_data::<web::Data<AccountApi<B>>>().cloned().ok_or_else(|| {
                error!("👤️ No AccountApi has been registered with the app. Cannot resolve profiles.");
                ServerError::InitializeError("AccountApi is not configured".into())
            })?;
            let profile = api
                .profile_by_id(profile_id)
                .await
                .map_err(ServerError::from)?
                .ok_or_else(|| ServerError::Unauthorized(format!("Profile #{profile_id} does not exist")))?;
            trace!("👤️ Request is on behalf of profile #{profile_id} ({})", profile.profile_type);
            req.extensions_mut().insert(profile);
            service.call(req).await
        })
    }
}

fn profile_id_from_header(req: &ServiceRequest) -> Result<i64, ServerError> {
    let header = req
        .headers()
        .get(PROFILE_ID_HEADER)
        .ok_or_else(|| ServerError::Unauthorized(format!("No {PROFILE_ID_HEADER} header")))?;
    header
        .to_str()
        .ok()
        .and_then(|s| s.trim().parse::<i64>().ok())
        .ok_or_else(|| ServerError::Unauthorized(format!("{header:?} is not a valid profile id")))
}
