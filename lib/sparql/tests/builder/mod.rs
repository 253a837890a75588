mod blocks;
mod select;
