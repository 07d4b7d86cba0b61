mod resource_service;


pub use resource_service::{
    AuthenticateRequest, CreateAccountRequest, CreateChirpRequest, ResourceService,
    ResourceServiceDependencies,
};
