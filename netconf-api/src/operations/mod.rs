//! NETCONF operations organized by protocol area

pub mod notifications;

pub use notifications::{
    build_create_subscription, build_delete_subscription, build_establish_subscription,
    CreateSubscriptionOperation, CreateSubscriptionRequest, DeleteSubscriptionOperation,
    DeleteSubscriptionRequest, EstablishSubscriptionOperation, EstablishSubscriptionRequest,
};
