mod menubar;
