pub mod mssim_vis3d;
