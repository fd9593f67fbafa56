mod toolbar;
