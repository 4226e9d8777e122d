/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/
/// Local token expiry
pub mod expiry;
/// Token persistence and purge
pub mod store;
