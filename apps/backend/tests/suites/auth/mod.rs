mod end_to_end;
mod identity;
mod sign_in;
mod sign_up;
