use folio_core_contact_impl::ContactFeatureServiceImpl;
use folio_core_health_impl::HealthFeatureServiceImpl;
use folio_email_impl::EmailServiceImpl;

// API
pub type RestServer = folio_api_rest::RestServer<HealthFeature, ContactFeature>;

// Email
pub type Email = EmailServiceImpl;

// Core
pub type HealthFeature = HealthFeatureServiceImpl<Email>;
pub type ContactFeature = ContactFeatureServiceImpl<Email>;
