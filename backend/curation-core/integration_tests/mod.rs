mod helpers;
mod importer_client;
mod session;
