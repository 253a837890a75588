mod rows;
mod snaks;
