/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/
/// Token pair and login models
pub mod auth;
/// Per-request configuration and header merging
pub mod http;
/// Request bodies and multipart forms
pub mod payload;
/// Request envelope handed to the dispatcher
pub mod requests;
/// Decoded responses
pub mod responses;
